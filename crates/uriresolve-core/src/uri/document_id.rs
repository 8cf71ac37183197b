//! `type:value` decomposition of provider document ids.

/// A document id split on its first `:`.
///
/// `primary:DCIM/foo.jpg` has kind `primary` and value `DCIM/foo.jpg`;
/// `image:1234` has kind `image` and value `1234`. An id without `:` keeps
/// the whole id as kind and an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentId {
    pub kind: String,
    pub value: String,
}

impl DocumentId {
    pub fn parse(id: &str) -> Self {
        match id.split_once(':') {
            Some((kind, value)) => Self {
                kind: kind.to_string(),
                value: value.to_string(),
            },
            None => Self {
                kind: id.to_string(),
                value: String::new(),
            },
        }
    }

    /// Kind equals `other`, ignoring ASCII case.
    pub fn kind_is(&self, other: &str) -> bool {
        self.kind.eq_ignore_ascii_case(other)
    }
}
