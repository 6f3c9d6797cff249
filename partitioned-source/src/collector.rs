//! Seam between the source and the downstream stage. The core never inspects
//! records; it only hands the collector through to the source, which decides
//! the record shape via the associated type.

/// Receives the records of one batch emission.
pub trait Collector: Send {
    type Record;

    fn emit(&mut self, record: Self::Record);
}

/// Buffering collector backed by a `Vec`, mostly useful in tests and for
/// sources that hand a whole batch downstream at once.
#[derive(Debug)]
pub struct VecCollector<R> {
    records: Vec<R>,
}

impl<R> VecCollector<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R> Default for VecCollector<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send> Collector for VecCollector<R> {
    type Record = R;

    fn emit(&mut self, record: R) {
        self.records.push(record);
    }
}
