use std::collections::HashSet;

/// Hands out unique entry names.
///
/// A repeated name gets a `-N` suffix before its extension:
/// `clip.mxf`, `clip-1.mxf`, `clip-2.mxf`.
#[derive(Debug, Default)]
pub struct EntryNames {
    used: HashSet<String>,
}

impl EntryNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, name: &str) -> String {
        if self.used.insert(name.to_string()) {
            return name.to_string();
        }

        let (stem, ext) = match name.rfind('.') {
            Some(idx) if idx > 0 => name.split_at(idx),
            _ => (name, ""),
        };

        let mut n = 1;
        loop {
            let candidate = format!("{stem}-{n}{ext}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
