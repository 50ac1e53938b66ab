//! Patient biometric records and the text format they are read from.

use core::cmp::Ordering;
use core::fmt;
use std::io::Read;

use tracing::{debug, warn};

use crate::errors::ParseError;
use crate::ordered_list::OrderedList;

/// One patient's biometrics. Identity and ordering come from `id` alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Patient {
    pub id: u64,
    /// Centimetres.
    pub height: u64,
    /// Kilograms.
    pub weight: u64,
    /// Years.
    pub age: u64,
}

impl Patient {
    pub const fn new(id: u64, height: u64, weight: u64, age: u64) -> Self {
        Self {
            id,
            height,
            weight,
            age,
        }
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Patient {}

impl PartialOrd for Patient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Patient {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// Fixed-column row: id, height, weight (right-aligned to 3), age.
impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t\t {}\t\t {:>3}\t\t\t{}",
            self.id, self.height, self.weight, self.age
        )
    }
}

impl OrderedList<Patient> {
    /// Sum of every record's weight; saturates rather than wrapping.
    pub fn sum_of_weights(&self) -> u64 {
        self.iter().fold(0u64, |acc, p| acc.saturating_add(p.weight))
    }

    /// Integer (truncated) mean weight, `None` for an empty list.
    pub fn average_weight(&self) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        Some(self.sum_of_weights() / self.len() as u64)
    }
}

/// Drain `reader` and parse every complete record in it.
///
/// Only a failing read is an error. Bytes that are not valid UTF-8 end the
/// records the same way any other malformed token does.
pub fn read_patients<R: Read>(mut reader: R) -> Result<Vec<Patient>, ParseError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(parse_records(&bytes))
}

/// Parse whitespace-separated records of `id height weight age`.
///
/// Stops at the first token that is not an unsigned integer, or at a trailing
/// record with fewer than four fields. Everything parsed up to that point is
/// returned.
pub fn parse_patients(text: &str) -> Vec<Patient> {
    parse_records(text.as_bytes())
}

fn parse_records(bytes: &[u8]) -> Vec<Patient> {
    let mut tokens = bytes
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());
    let mut patients = Vec::new();

    loop {
        let mut fields = [0u64; 4];
        for (i, slot) in fields.iter_mut().enumerate() {
            let Some(token) = tokens.next() else {
                if i > 0 {
                    warn!(
                        record = patients.len() + 1,
                        fields = i,
                        "dropping truncated record at end of input"
                    );
                }
                debug!(count = patients.len(), "finished reading patient records");
                return patients;
            };
            match parse_field(token) {
                Some(v) => *slot = v,
                None => {
                    warn!(
                        record = patients.len() + 1,
                        token = %String::from_utf8_lossy(token),
                        "stopping at malformed record"
                    );
                    return patients;
                }
            }
        }

        let [id, height, weight, age] = fields;
        patients.push(Patient::new(id, height, weight, age));
    }
}

fn parse_field(token: &[u8]) -> Option<u64> {
    core::str::from_utf8(token).ok()?.parse().ok()
}
