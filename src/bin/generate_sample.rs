//! Write a deterministic sample roster.
//!
//! Usage: `generate_sample [OUTPUT]` – `.parquet` output writes Parquet,
//! anything else JSON. Defaults to `sample_roster.json`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use student_roster::Student;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

const FIRST_NAMES: [&str; 8] = [
    "EMILY", "LUCAS", "CHLOE", "HUGO", "INES", "NATHAN", "JADE", "TOM",
];
const LAST_NAMES: [&str; 6] = ["MARTIN", "BERNARD", "DUBOIS", "THOMAS", "ROBERT", "PETIT"];
const STREETS: [&str; 5] = [
    "rue des Lilas",
    "avenue Victor Hugo",
    "boulevard Voltaire",
    "rue de la Paix",
    "place Bellecour",
];
const CITIES: [&str; 4] = ["Paris", "Lyon", "Nantes", "Lille"];

fn generate_roster(rng: &mut SimpleRng, count: usize) -> Vec<Student> {
    (0..count)
        .map(|_| {
            let name = format!(
                "{} {}",
                FIRST_NAMES[rng.below(FIRST_NAMES.len() as u64) as usize],
                LAST_NAMES[rng.below(LAST_NAMES.len() as u64) as usize]
            );
            let address = format!(
                "{} {}, {}",
                1 + rng.below(120),
                STREETS[rng.below(STREETS.len() as u64) as usize],
                CITIES[rng.below(CITIES.len() as u64) as usize]
            );
            // Centre each student on their own level, whole or half points.
            let level = 6 + rng.below(11);
            let notes = (0..2 + rng.below(4))
                .map(|_| {
                    let spread = rng.below(17) as f64 / 2.0 - 4.0;
                    (level as f64 + spread).clamp(0.0, 20.0)
                })
                .collect();
            Student::new(name, address, notes)
        })
        .collect()
}

fn write_json(path: &Path, students: &[Student]) -> Result<()> {
    let text = serde_json::to_string_pretty(students).context("serializing roster")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn write_parquet(path: &Path, students: &[Student]) -> Result<()> {
    let mut notes_builder = ListBuilder::new(Float64Builder::new());
    for student in students {
        let values = notes_builder.values();
        for &n in &student.notes {
            values.append_value(n);
        }
        notes_builder.append(true);
    }
    let notes_array = notes_builder.finish();

    let name_array = StringArray::from(
        students.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
    );
    let address_array = StringArray::from(
        students.iter().map(|s| s.address.as_str()).collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("address", DataType::Utf8, false),
        Field::new(
            "notes",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(name_array),
            Arc::new(address_array),
            Arc::new(notes_array),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_roster.json".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let students = generate_roster(&mut rng, 24);

    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(path, &students)?;
    } else {
        write_json(path, &students)?;
    }

    println!("Wrote {} students to {}", students.len(), path.display());
    Ok(())
}
