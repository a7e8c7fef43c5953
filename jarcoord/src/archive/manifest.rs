//! JAR manifest parsing.
//!
//! `META-INF/MANIFEST.MF` is a sequence of sections separated by blank
//! lines. Only the main (first) section describes the archive as a whole;
//! later sections describe individual entries and are ignored here.
//!
//! ```text
//! Manifest-Version: 1.0
//! Implementation-Title: widget
//! Implementation-Version: 2.3.1
//! Bundle-SymbolicName: com.acme.widget;singleton:=tr
//!  ue
//!
//! Name: com/acme/
//! Sealed: true
//! ```
//!
//! Lines are limited to 72 bytes, so long values continue on following
//! lines that start with a single space.

/// Path of the manifest inside an archive.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Main attributes of a JAR manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    /// Parse the main section of a manifest.
    ///
    /// Parsing is lenient: lines without a `:` are skipped and stray
    /// continuation lines before the first attribute are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarcoord::archive::Manifest;
    ///
    /// let manifest = Manifest::parse("Manifest-Version: 1.0\r\nImplementation-Version: 2.3.1\r\n");
    /// assert_eq!(manifest.get("implementation-version"), Some("2.3.1"));
    /// ```
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut attributes: Vec<(String, String)> = Vec::new();

        for line in normalized.split('\n') {
            if line.is_empty() {
                if attributes.is_empty() {
                    continue;
                }
                // End of the main section
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                if let Some((_, value)) = attributes.last_mut() {
                    value.push_str(continuation);
                }
                continue;
            }

            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            attributes.push((name.to_string(), value.trim_start().to_string()));
        }

        for (_, value) in attributes.iter_mut() {
            let trimmed = value.trim_end();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }

        Self { attributes }
    }

    /// Look up an attribute by name, ignoring case.
    ///
    /// Returns the first occurrence; empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// All main attributes in file order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of main attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the main section has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
