use ulid::Ulid;

/// Source of scenario ids. Any generator of strings unique with
/// overwhelming probability will do.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UlidIdSource;

impl IdSource for UlidIdSource {
    fn next_id(&mut self) -> String {
        format!("scn_{}", Ulid::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdSource, UlidIdSource};

    #[test]
    fn ulid_ids_are_prefixed_and_distinct() {
        let mut source = UlidIdSource;
        let first = source.next_id();
        let second = source.next_id();
        assert!(first.starts_with("scn_"));
        assert_eq!(first.len(), 4 + 26);
        assert_ne!(first, second);
    }
}
