//! Label table

use indexmap::IndexMap;

use crate::error::AsmError;

// name -> (definition line, resolved address)
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: IndexMap<String, (usize, Option<u16>)>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self {
            labels: IndexMap::new(),
        }
    }

    /// Register a label definition. A name may only be defined once.
    pub fn define(&mut self, name: &str, line: usize) -> Result<(), AsmError> {
        if let Some(&(first_line, _)) = self.labels.get(name) {
            return Err(AsmError::DuplicateLabel {
                name: name.to_string(),
                first_line,
                line,
            });
        }
        self.labels.insert(name.to_string(), (line, None));
        Ok(())
    }

    pub fn resolve(&mut self, name: &str, addr: u16) {
        if let Some(entry) = self.labels.get_mut(name) {
            entry.1 = Some(addr);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.labels.get(name).and_then(|&(_, addr)| addr)
    }

    pub fn definition_line(&self, name: &str) -> Option<usize> {
        self.labels.get(name).map(|&(line, _)| line)
    }

    pub fn clear_addresses(&mut self) {
        for entry in self.labels.values_mut() {
            entry.1 = None;
        }
    }

    /// Labels and their addresses, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u16>)> {
        self.labels.iter().map(|(name, &(_, addr))| (name.as_str(), addr))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
