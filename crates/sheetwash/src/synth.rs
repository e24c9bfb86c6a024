//! Seeded generator of deliberately imperfect travel-survey data.
//!
//! Produces a [`RawTable`] over seven fixed columns, then damages it:
//! single missing cells, rows with only two populated columns, and malformed
//! or overlong trip times. The same seed always yields the same table.

use serde::{Deserialize, Serialize};

use crate::input::{AGE_COLUMN, RawTable, SALARY_COLUMN};

/// Header of the gender column.
pub const GENDER_COLUMN: &str = "Płeć";
/// Header of the education column.
pub const EDUCATION_COLUMN: &str = "Wykształcenie";
/// Header of the trip start time column.
pub const TRIP_START_COLUMN: &str = "Czas Początkowy Podróży";
/// Header of the trip end time column.
pub const TRIP_END_COLUMN: &str = "Czas Końcowy Podróży";
/// Header of the trip purpose column.
pub const TRIP_PURPOSE_COLUMN: &str = "Cel Podróży";

/// All generated columns, in order.
pub const COLUMNS: [&str; 7] = [
    GENDER_COLUMN,
    AGE_COLUMN,
    EDUCATION_COLUMN,
    SALARY_COLUMN,
    TRIP_START_COLUMN,
    TRIP_END_COLUMN,
    TRIP_PURPOSE_COLUMN,
];

const GENDERS: &[&str] = &["Mężczyzna", "Kobieta"];
const EDUCATION_LEVELS: &[&str] = &["Podstawowe", "Średnie", "Wyższe"];
const TRIP_PURPOSES: &[&str] = &["Praca", "Zakupy", "Edukacja", "Rozrywka", "Inne"];

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for every random draw (the student number).
    pub seed: u64,
    /// Number of rows.
    pub samples: usize,
    /// Fraction of rows that receive one missing cell.
    pub missing_rate: f64,
    /// Fraction of rows reduced to two populated columns.
    pub partial_rate: f64,
    /// Fraction of rows with broken trip times.
    pub invalid_time_rate: f64,
    /// Write salaries with a decimal comma, as a Polish-locale sheet shows them.
    pub decimal_comma: bool,
}

impl GeneratorConfig {
    /// Default damage rates for the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            samples: 1000,
            missing_rate: 0.05,
            partial_rate: 0.02,
            invalid_time_rate: 0.02,
            decimal_comma: true,
        }
    }

    /// Set the number of rows.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    fn count(&self, rate: f64) -> usize {
        (rate * self.samples as f64).floor() as usize
    }
}

/// Generate a damaged dataset.
pub fn generate(config: &GeneratorConfig) -> RawTable {
    let mut rng = fastrand::Rng::with_seed(config.seed);
    let n = config.samples;

    let mut rows: Vec<Vec<String>> = (0..n)
        .map(|_| {
            let (start, end) = travel_time(&mut rng);
            let salary = format!("{:.2}", 3000.0 + rng.f64() * 12000.0);
            let salary = if config.decimal_comma {
                salary.replace('.', ",")
            } else {
                salary
            };
            vec![
                pick(&mut rng, GENDERS),
                rng.u32(18..=70).to_string(),
                pick(&mut rng, EDUCATION_LEVELS),
                salary,
                start,
                end,
                pick(&mut rng, TRIP_PURPOSES),
            ]
        })
        .collect();

    if n == 0 {
        return RawTable::new(headers(), rows);
    }

    // Single missing cells
    for _ in 0..config.count(config.missing_rate) {
        let row = rng.usize(0..n);
        let col = rng.usize(0..COLUMNS.len());
        rows[row][col].clear();
    }

    // Rows keeping only two columns
    for _ in 0..config.count(config.partial_rate) {
        let row = rng.usize(0..n);
        let keep = rng.choose_multiple(0..COLUMNS.len(), 2);
        for (col, cell) in rows[row].iter_mut().enumerate() {
            if !keep.contains(&col) {
                cell.clear();
            }
        }
    }

    // Broken trip times
    let start_idx = column_index(TRIP_START_COLUMN);
    let end_idx = column_index(TRIP_END_COLUMN);
    for _ in 0..config.count(config.invalid_time_rate) {
        let row = rng.usize(0..n);
        if rng.f64() < 0.5 {
            // Hour out of range
            rows[row][start_idx] = format!("{}:{:02}", rng.u32(24..=30), rng.u32(0..=59));
        } else {
            // Trip longer than twelve hours
            let (start, _) = travel_time(&mut rng);
            let start_hour: u32 = start[..2].parse().unwrap_or(0);
            rows[row][end_idx] = format!("{:02}:{:02}", (start_hour + 13) % 24, rng.u32(0..=59));
            rows[row][start_idx] = start;
        }
    }

    tracing::debug!(seed = config.seed, rows = n, "generated synthetic dataset");
    RawTable::new(headers(), rows)
}

fn headers() -> Vec<String> {
    COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn column_index(name: &str) -> usize {
    COLUMNS.iter().position(|c| *c == name).unwrap_or(0)
}

fn pick(rng: &mut fastrand::Rng, values: &[&str]) -> String {
    values[rng.usize(0..values.len())].to_string()
}

/// Start and end as "HH:MM"; the trip lasts between 0.1 and 12 hours.
fn travel_time(rng: &mut fastrand::Rng) -> (String, String) {
    let start_hour = rng.u32(5..=23);
    let start_minute = rng.u32(0..=59);
    let duration = 0.1 + rng.f64() * 11.9;

    let end_hour = (start_hour + duration.trunc() as u32) % 24;
    let end_minute = (start_minute + (duration.fract() * 60.0) as u32) % 60;

    (
        format!("{:02}:{:02}", start_hour, start_minute),
        format!("{:02}:{:02}", end_hour, end_minute),
    )
}
