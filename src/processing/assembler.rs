//! Record assembler: collects labelled fields across tokens into records.
//!
//! Each record type declares its fields in scan order. Every token is scanned
//! for every field; a hit stores the value (replacing any value seen since the
//! last emission). As soon as all fields have been seen the record is built,
//! stored under its name (last write wins) and the assembler starts over.

use super::field_scanner::scan_field;
use std::collections::HashMap;

/// One labelled field of a record.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Literal label including the colon, e.g. `name:`.
    pub label: &'static str,
    /// Applied to the scanned value before it is stored.
    pub normalize: fn(&str) -> String,
}

impl FieldSpec {
    pub const fn new(label: &'static str, normalize: fn(&str) -> String) -> FieldSpec {
        FieldSpec { label, normalize }
    }

    /// A field stored exactly as scanned.
    pub const fn raw(label: &'static str) -> FieldSpec {
        FieldSpec::new(label, keep)
    }
}

fn keep(value: &str) -> String {
    value.to_string()
}

/// A record type the assembler can build.
pub trait Extractable: Sized {
    /// Required fields, in scan order.
    const FIELDS: &'static [FieldSpec];

    /// Build the record from values given in `FIELDS` order.
    fn from_fields(values: Vec<String>) -> Self;

    /// Key of the record in the output map.
    fn key(&self) -> &str;
}

/// Progress towards the next record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    AllPending,
    PartiallySeen,
}

/// Accumulates fields for one record type. One instance per extraction pass.
#[derive(Debug)]
pub struct RecordAssembler<R: Extractable> {
    values: Vec<Option<String>>,
    records: HashMap<String, R>,
    emitted: usize,
}

impl<R: Extractable> RecordAssembler<R> {
    pub fn new() -> RecordAssembler<R> {
        RecordAssembler {
            values: vec![None; R::FIELDS.len()],
            records: HashMap::new(),
            emitted: 0,
        }
    }

    /// Scan one token. Returns true if a record was emitted.
    pub fn observe(&mut self, token: &str) -> bool {
        for (slot, field) in self.values.iter_mut().zip(R::FIELDS) {
            if let Some(value) = scan_field(token, field.label) {
                *slot = Some((field.normalize)(value));
            }
        }
        if self.values.iter().all(Option::is_some) {
            self.emit();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> AssemblerState {
        if self.values.iter().any(Option::is_some) {
            AssemblerState::PartiallySeen
        } else {
            AssemblerState::AllPending
        }
    }

    /// Records emitted so far, including ones later overwritten.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Consume the assembler. A partially seen record is dropped.
    pub fn finish(self) -> HashMap<String, R> {
        if self.state() == AssemblerState::PartiallySeen {
            log::debug!("Dropping incomplete trailing record");
        }
        self.records
    }

    fn emit(&mut self) {
        let values: Vec<String> = self.values.iter_mut().filter_map(Option::take).collect();
        let record = R::from_fields(values);
        let key = record.key().to_string();
        log::trace!("emit record '{key}'");
        if self.records.insert(key.clone(), record).is_some() {
            log::debug!("Record '{key}' seen again, keeping the latest");
        }
        self.emitted += 1;
    }
}

impl<R: Extractable> Default for RecordAssembler<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        name: String,
        val: String,
    }

    impl Extractable for Pair {
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::raw("name:"), FieldSpec::raw("val:")];

        fn from_fields(mut values: Vec<String>) -> Self {
            let val = values.pop().unwrap_or_default();
            let name = values.pop().unwrap_or_default();
            Pair { name, val }
        }

        fn key(&self) -> &str {
            &self.name
        }
    }

    fn feed(tokens: &[&str]) -> RecordAssembler<Pair> {
        let mut assembler = RecordAssembler::new();
        for token in tokens {
            assembler.observe(token);
        }
        assembler
    }

    #[test]
    fn test_emits_when_all_fields_seen() {
        let mut assembler = RecordAssembler::<Pair>::new();
        assert_eq!(assembler.state(), AssemblerState::AllPending);
        assert!(!assembler.observe("name:a"));
        assert_eq!(assembler.state(), AssemblerState::PartiallySeen);
        assert!(assembler.observe("val:1"));
        assert_eq!(assembler.state(), AssemblerState::AllPending);
        let records = assembler.finish();
        assert_eq!(records["a"].val, "1");
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let records = feed(&["val:1", "name:a", "val:2", "noise", "name:b"]).finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records["a"].val, "1");
        assert_eq!(records["b"].val, "2");
    }

    #[test]
    fn test_latest_value_wins_before_completion() {
        let records = feed(&["name:a", "name:b", "val:1"]).finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records["b"].val, "1");
    }

    #[test]
    fn test_duplicate_name_overwrites() {
        let assembler = feed(&["name:sub-A", "val:1", "name:sub-A", "val:2"]);
        assert_eq!(assembler.emitted(), 2);
        let records = assembler.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records["sub-A"].val, "2");
    }

    #[test]
    fn test_incomplete_trailing_record_dropped() {
        let records = feed(&["name:a", "val:1", "name:b"]).finish();
        assert_eq!(records.len(), 1);
        assert!(!records.contains_key("b"));
    }

    #[test]
    fn test_one_token_can_complete_record() {
        let mut assembler = RecordAssembler::<Pair>::new();
        assert!(assembler.observe("name:a,val:1"));
    }
}
