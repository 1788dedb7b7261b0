use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, Float64Builder, Int64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use student_roster::data::stats;
use student_roster::data::loader::load_file;
use student_roster::{GradeScale, Session, Student};

fn write_parquet(path: &Path, names: &[&str], notes: impl Array + 'static) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("notes", notes.data_type().clone(), true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(StringArray::from(names.to_vec())), Arc::new(notes)],
    )
    .unwrap();

    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

fn float_notes(rows: &[&[Option<f64>]]) -> arrow::array::ListArray {
    let mut notes = ListBuilder::new(Float64Builder::new());
    for row in rows {
        for n in *row {
            notes.values().append_option(*n);
        }
        notes.append(true);
    }
    notes.finish()
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn bundled_roster_loads_cleanly() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/student.txt");
    let outcome = load_file(&path).unwrap();
    assert_eq!(outcome.roster.len(), 12);
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.roster.students()[0].name, "EMILY MARTIN");
}

#[test]
fn json_roster_keeps_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "class.json",
        r#"[
            {"name": "Emily", "address": "1 rue A", "notes": [12, 14, 16]},
            {"name": "Tom", "address": "2 rue B", "notes": [18, 20]}
        ]"#,
    );

    let outcome = load_file(&path).unwrap();
    assert_eq!(
        outcome.roster.students(),
        [
            Student::new("Emily", "1 rue A", vec![12.0, 14.0, 16.0]),
            Student::new("Tom", "2 rue B", vec![18.0, 20.0]),
        ]
    );
}

#[test]
fn csv_roster_with_semicolon_notes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "class.csv",
        "name,address,notes\n\
         Emily,1 rue A,12;14;16\n\
         Tom,2 rue B,18;20\n\
         Nobody,3 rue C,\n\
         ,4 rue D,10\n\
         Broken,5 rue E,12;abc\n",
    );

    let outcome = load_file(&path).unwrap();
    let names: Vec<&str> = outcome.roster.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Emily", "Tom", "Nobody"]);
    assert!(outcome.roster.students()[2].notes.is_empty());

    let rows: Vec<usize> = outcome.rejected.iter().map(|r| r.row).collect();
    assert_eq!(rows, [3, 4]);
}

#[test]
fn csv_without_notes_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "class.csv", "name,address\nEmily,1 rue A\n");
    let err = load_file(&path).unwrap_err();
    assert!(err.to_string().contains("notes"));
}

#[test]
fn parquet_roster_with_integer_notes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class.parquet");

    let mut notes = ListBuilder::new(Int64Builder::new());
    for row in [vec![12, 14, 16], vec![18, 20]] {
        for n in row {
            notes.values().append_value(n);
        }
        notes.append(true);
    }
    let notes = notes.finish();

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("address", DataType::Utf8, false),
        Field::new("notes", notes.data_type().clone(), false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Emily", "Tom"])),
            Arc::new(StringArray::from(vec!["1 rue A", "2 rue B"])),
            Arc::new(notes),
        ],
    )
    .unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let outcome = load_file(&path).unwrap();
    assert_eq!(outcome.roster.len(), 2);
    assert_eq!(outcome.roster.students()[0].notes, [12.0, 14.0, 16.0]);
    assert_eq!(outcome.roster.students()[1].average(), 19.0);
}

#[test]
fn unparseable_source_gives_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "student.txt", "{ this is not json");

    assert!(load_file(&path).is_err());

    let session = Session::load(&path, GradeScale::default());
    assert!(session.roster().is_empty());
    assert!(session.status_message.is_some());
}

#[test]
fn malformed_entries_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "student.txt",
        r#"[{"name": "Emily", "notes": [12]}, {"name": 7, "notes": [1]}]"#,
    );

    let session = Session::load(&path, GradeScale::default());
    assert_eq!(session.roster().len(), 1);
    assert_eq!(session.rejected.len(), 1);
    assert_eq!(session.rejected[0].row, 1);
    assert!(session.status_message.is_none());
}

#[test]
fn parquet_nan_grade_rejects_only_that_student() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class.parquet");
    let notes = float_notes(&[
        &[Some(12.0)],
        &[Some(f64::NAN), Some(10.0)],
        &[Some(f64::INFINITY)],
        &[Some(16.0)],
    ]);
    write_parquet(&path, &["S0", "S1", "S2", "S3"], notes);

    let outcome = load_file(&path).unwrap();
    let names: Vec<&str> = outcome.roster.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["S0", "S3"]);
    let rows: Vec<usize> = outcome.rejected.iter().map(|r| r.row).collect();
    assert_eq!(rows, [1, 2]);
    assert!(outcome.rejected[0].reason.contains("notes[0]"));

    let stats = stats::compute(&outcome.roster).unwrap();
    assert_eq!(stats.mean, 14.0);
    assert_eq!(stats.best.len(), 1);
    assert_eq!(stats.worst.len(), 1);
}

#[test]
fn parquet_null_grade_keeps_the_rest_of_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class.parquet");
    let notes = float_notes(&[&[Some(12.0)], &[None, Some(10.0)]]);
    write_parquet(&path, &["S0", "S1"], notes);

    let outcome = load_file(&path).unwrap();
    assert_eq!(outcome.roster.len(), 1);
    assert_eq!(outcome.roster.students()[0].name, "S0");
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].row, 1);
    assert!(outcome.rejected[0].reason.contains("null"));
}

#[test]
fn parquet_null_list_reads_as_no_grades() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class.parquet");
    let mut notes = ListBuilder::new(Float64Builder::new());
    notes.append(false);
    write_parquet(&path, &["Absent"], notes.finish());

    let outcome = load_file(&path).unwrap();
    assert!(outcome.rejected.is_empty());
    assert!(outcome.roster.students()[0].notes.is_empty());
    assert_eq!(outcome.roster.students()[0].average(), 0.0);
}

#[test]
fn csv_non_finite_grades_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "class.csv",
        "name,address,notes\n\
         Emily,1 rue A,12;14\n\
         Inf,2 rue B,12;inf\n\
         Nan,3 rue C,NaN\n\
         Minus,4 rue D,-infinity;10\n",
    );

    let outcome = load_file(&path).unwrap();
    let names: Vec<&str> = outcome.roster.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Emily"]);
    let rows: Vec<usize> = outcome.rejected.iter().map(|r| r.row).collect();
    assert_eq!(rows, [1, 2, 3]);
}

#[test]
fn generated_samples_load_back() {
    let dir = tempfile::tempdir().unwrap();

    for file_name in ["sample.json", "sample.parquet"] {
        let path = dir.path().join(file_name);
        let status = std::process::Command::new(env!("CARGO_BIN_EXE_generate_sample"))
            .arg(&path)
            .stdout(std::process::Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "{file_name}");

        let outcome = load_file(&path).unwrap();
        assert_eq!(outcome.roster.len(), 24, "{file_name}");
        assert!(outcome.rejected.is_empty(), "{file_name}");
        assert!(outcome
            .roster
            .iter()
            .all(|s| !s.notes.is_empty() && s.notes.iter().all(|n| (0.0..=20.0).contains(n))));
    }

    let json = load_file(&dir.path().join("sample.json")).unwrap();
    let parquet = load_file(&dir.path().join("sample.parquet")).unwrap();
    assert_eq!(json.roster, parquet.roster);
}
