use serde::{Deserialize, Serialize};

/// Separator between the directory part of an identifier and its file name.
pub const PATH_SEPARATOR: char = '/';

/// Structured view of a dataset identifier that ends in a registered extension.
///
/// `"02_intermediate/data.profile.html"` parsed against `.profile.html` yields
/// directory `02_intermediate`, name `data`, extension `.profile.html` and
/// basename `data.profile.html`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WingInfo {
    pub directory: String,
    pub name: String,
    pub extension: String,
    /// File name on disk: `name + extension`, or `name.namespace + extension`
    /// when a namespace prefix was stripped.
    pub basename: String,
    pub namespace: String,
}

impl WingInfo {
    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Re-join the directory and basename.
    ///
    /// Without namespace stripping this reproduces the parsed identifier.
    pub fn path(&self) -> String {
        if self.directory.is_empty() {
            self.basename.clone()
        } else {
            format!("{}{}{}", self.directory, PATH_SEPARATOR, self.basename)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_directory() {
        let wing = WingInfo {
            name: "data".to_string(),
            extension: ".csv".to_string(),
            basename: "data.csv".to_string(),
            ..Default::default()
        };
        assert_eq!(wing.path(), "data.csv");
        assert!(!wing.has_namespace());
    }

    #[test]
    fn test_path_with_directory() {
        let wing = WingInfo {
            directory: "01_raw/nested".to_string(),
            name: "data".to_string(),
            extension: ".csv".to_string(),
            basename: "data.csv".to_string(),
            namespace: String::new(),
        };
        assert_eq!(wing.path(), "01_raw/nested/data.csv");
    }

    #[test]
    fn test_equal_fields_compare_equal() {
        assert_eq!(WingInfo::default(), WingInfo::default());
    }
}
