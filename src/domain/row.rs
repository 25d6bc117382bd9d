// ============================================================
// Layer 3 - Row
// ============================================================
// One data line of the input table, keyed by heading names and
// kept in column order. The loading layer builds rows; the exam
// only reads them.
//
// A line shorter than the heading is padded with "" cells. A line
// longer than the heading keeps its extra values apart, as
// overflow: they have no key, and their presence is how an
// unpaired separator is told apart from a plain heading mismatch.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells:    Vec<(String, String)>,
    overflow: Vec<String>,
}

impl Row {
    pub fn new<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells:    cells.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            overflow: Vec::new(),
        }
    }

    /// Pair a record with the heading line
    pub fn from_record<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let value = values.get(i).map(AsRef::as_ref).unwrap_or("");
                (h.as_ref().to_string(), value.to_string())
            })
            .collect();
        let overflow = values
            .iter()
            .skip(headers.len())
            .map(|v| v.as_ref().to_string())
            .collect();
        Self { cells, overflow }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// (key, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}
