//! Text report over a sorted patient list.

use core::fmt;
use std::io::{self, Read, Write};

use tracing::info;

use crate::errors::ParseError;
use crate::extremes::{Extremes, Extremum};
use crate::ordered_list::OrderedList;
use crate::patient::{read_patients, Patient};

const TABLE_RULE: &str = " // ========================================== ";
const TABLE_HEADER: &str = "PATIENT   HEIGHT(cm)   WEIGHT(kg)    AGE(yrs)";
const TABLE_UNDERLINE: &str = "===============================================";

/// Whole-list table: blank line, rule, column header, one row per record.
impl fmt::Display for OrderedList<Patient> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Patient List is empty");
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "{TABLE_RULE}")?;
        writeln!(f, "{TABLE_HEADER}")?;
        writeln!(f, "{TABLE_UNDERLINE}")?;
        for p in self {
            writeln!(f, " {p}")?;
        }
        writeln!(f)
    }
}

/// Read every record from `reader` into a list sorted by id.
pub fn load_sorted<R: Read>(reader: R) -> Result<OrderedList<Patient>, ParseError> {
    let patients = read_patients(reader)?;
    let mut list = OrderedList::with_capacity(patients.len());
    for p in patients {
        list.insert_sorted(p);
    }
    Ok(list)
}

/// Write the record count, the sorted table, the six extremum sections and
/// the average weight.
pub fn write_report<W: Write>(
    out: &mut W,
    source: &str,
    patients: &OrderedList<Patient>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} records read from file: {source}", patients.len())?;
    writeln!(out, "{patients}")?;

    let (Ok(extremes), Some(average)) = (Extremes::scan(patients), patients.average_weight())
    else {
        info!(source, "no patient records to summarise");
        writeln!(out, "no patient records to summarise")?;
        return Ok(());
    };

    for pair in Extremum::ALL.chunks(2) {
        for &kind in pair {
            write!(out, "{}{}", kind.label(), extremes.get(kind))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "average weight: {average} kg")?;
    info!(source, records = patients.len(), average, "report written");
    Ok(())
}
