use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Average calculator
// ---------------------------------------------------------------------------

/// Arithmetic mean of a grade sequence. An empty sequence averages to `0.0`.
///
/// No rounding happens here; display code rounds to two decimals.
pub fn average(notes: &[f64]) -> f64 {
    if notes.is_empty() {
        return 0.0;
    }
    notes.iter().sum::<f64>() / notes.len() as f64
}

// ---------------------------------------------------------------------------
// GradeScale – inclusive range of meaningful grades
// ---------------------------------------------------------------------------

/// Inclusive grading range. Bounds the filter threshold and supplies the
/// `/20` suffix shown after averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    #[serde(default = "default_min_grade")]
    pub min: f64,
    #[serde(default = "default_max_grade")]
    pub max: f64,
}

fn default_min_grade() -> f64 {
    0.0
}

fn default_max_grade() -> f64 {
    20.0
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            min: default_min_grade(),
            max: default_max_grade(),
        }
    }
}

impl GradeScale {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// Student – one record of the roster
// ---------------------------------------------------------------------------

/// A single student record. Names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub address: String,
    /// Grades, typically on a 0–20 scale.
    pub notes: Vec<f64>,
}

impl Student {
    pub fn new(name: impl Into<String>, address: impl Into<String>, notes: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            notes,
        }
    }

    /// Mean of this student's grades, see [`average`].
    pub fn average(&self) -> f64 {
        average(&self.notes)
    }
}

// ---------------------------------------------------------------------------
// Roster – the complete loaded repository
// ---------------------------------------------------------------------------

/// Ordered, read-only collection of students.
///
/// Built once from a data source; no mutation API is exposed afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    /// A roster with no records, used when the data source cannot be read.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All students in load order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
