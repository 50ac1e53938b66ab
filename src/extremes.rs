//! Min/max partitioning of a patient list.

use tracing::debug;

use crate::errors::ListError;
use crate::ordered_list::OrderedList;
use crate::patient::Patient;

/// The six extremum lists a scan produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    Youngest,
    Oldest,
    Shortest,
    Tallest,
    Lightest,
    Heaviest,
}

impl Extremum {
    /// Report order.
    pub const ALL: [Extremum; 6] = [
        Extremum::Youngest,
        Extremum::Oldest,
        Extremum::Shortest,
        Extremum::Tallest,
        Extremum::Lightest,
        Extremum::Heaviest,
    ];

    /// Section heading printed before the list.
    pub fn label(self) -> &'static str {
        match self {
            Extremum::Youngest => "youngest patient(s) is(are): ",
            Extremum::Oldest => "oldest patient(s) is(are): ",
            Extremum::Shortest => "shortest patients is(are): ",
            Extremum::Tallest => "tallest patients is(are): ",
            Extremum::Lightest => "lightest patients is(are): ",
            Extremum::Heaviest => "heaviest patients is(are): ",
        }
    }
}

/// Smallest and largest value seen for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u64,
    pub max: u64,
}

impl Bounds {
    fn seed(v: u64) -> Self {
        Self { min: v, max: v }
    }

    fn include(self, v: u64) -> Self {
        Self {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }
}

/// Result of [`Extremes::scan`]: field bounds plus copies of every record
/// sitting on one of them, in source order.
#[derive(Debug, Clone)]
pub struct Extremes {
    pub height: Bounds,
    pub weight: Bounds,
    pub age: Bounds,
    pub youngest: OrderedList<Patient>,
    pub oldest: OrderedList<Patient>,
    pub shortest: OrderedList<Patient>,
    pub tallest: OrderedList<Patient>,
    pub lightest: OrderedList<Patient>,
    pub heaviest: OrderedList<Patient>,
}

impl Extremes {
    /// Fold the bounds of height, weight and age, then copy every record
    /// that ties a bound into the matching list.
    ///
    /// A record can land in several lists; with a single record it lands in
    /// all six.
    pub fn scan(list: &OrderedList<Patient>) -> Result<Self, ListError> {
        let first = list.front().ok_or(ListError::Empty)?;
        let seed = (
            Bounds::seed(first.height),
            Bounds::seed(first.weight),
            Bounds::seed(first.age),
        );
        let (height, weight, age) = list.iter().skip(1).fold(seed, |(h, w, a), p| {
            (h.include(p.height), w.include(p.weight), a.include(p.age))
        });

        let mut out = Extremes {
            height,
            weight,
            age,
            youngest: OrderedList::new(),
            oldest: OrderedList::new(),
            shortest: OrderedList::new(),
            tallest: OrderedList::new(),
            lightest: OrderedList::new(),
            heaviest: OrderedList::new(),
        };

        for p in list {
            if p.height == height.min {
                out.shortest.append(*p);
            }
            if p.height == height.max {
                out.tallest.append(*p);
            }
            if p.weight == weight.min {
                out.lightest.append(*p);
            }
            if p.weight == weight.max {
                out.heaviest.append(*p);
            }
            if p.age == age.min {
                out.youngest.append(*p);
            }
            if p.age == age.max {
                out.oldest.append(*p);
            }
        }

        debug!(?height, ?weight, ?age, "scanned {} patient records", list.len());
        Ok(out)
    }

    pub fn get(&self, kind: Extremum) -> &OrderedList<Patient> {
        match kind {
            Extremum::Youngest => &self.youngest,
            Extremum::Oldest => &self.oldest,
            Extremum::Shortest => &self.shortest,
            Extremum::Tallest => &self.tallest,
            Extremum::Lightest => &self.lightest,
            Extremum::Heaviest => &self.heaviest,
        }
    }
}
