//! Embedded descriptor strategy.
//!
//! Maven writes the project's POM and a small properties file into every
//! archive it builds:
//!
//! ```text
//! META-INF/maven/{groupId}/{artifactId}/pom.xml
//! META-INF/maven/{groupId}/{artifactId}/pom.properties
//! ```
//!
//! This is tool-authored metadata, so it is the most trustworthy source.
//! `pom.xml` is preferred; `pom.properties` fills whatever the POM leaves
//! unresolved (e.g. `${revision}` versions set on the command line).
//!
//! Shaded archives embed the descriptors of every bundled dependency. The
//! descriptor whose artifact directory matches the archive's file name is
//! used; when several exist and none matches, the strategy reports nothing
//! rather than guessing.

use std::collections::{BTreeMap, HashMap};

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::archive::ArchiveHandle;
use crate::coordinate::{CandidateCoordinate, Confidence};

const MAVEN_DESCRIPTOR_ROOT: &str = "META-INF/maven/";
const POM_FILE: &str = "pom.xml";
const POM_PROPERTIES_FILE: &str = "pom.properties";

/// Maximum nesting of `${...}` references followed while resolving a value.
const MAX_PROPERTY_DEPTH: usize = 8;

/// Coordinate fields read from a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomFields {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
}

impl PomFields {
    /// Fill empty fields from another descriptor.
    fn or(self, other: PomFields) -> PomFields {
        PomFields {
            group_id: self.group_id.or(other.group_id),
            artifact_id: self.artifact_id.or(other.artifact_id),
            version: self.version.or(other.version),
            packaging: self.packaging.or(other.packaging),
        }
    }

    fn into_candidate(self) -> CandidateCoordinate {
        let mut candidate = CandidateCoordinate::new(Confidence::EmbeddedDescriptor);
        if let Some(group_id) = self.group_id {
            candidate = candidate.with_group_id(group_id);
        }
        if let Some(artifact_id) = self.artifact_id {
            candidate = candidate.with_artifact_id(artifact_id);
        }
        if let Some(version) = self.version {
            candidate = candidate.with_version(version);
        }
        if let Some(packaging) = self.packaging {
            candidate = candidate.with_packaging(packaging);
        }
        candidate
    }
}

/// Descriptor files found under one `META-INF/maven/{g}/{a}/` directory.
#[derive(Debug, Default)]
struct DescriptorDir {
    artifact_dir: String,
    pom: Option<String>,
    properties: Option<String>,
}

pub(super) fn extract(archive: &mut ArchiveHandle) -> Option<CandidateCoordinate> {
    let dirs = find_descriptor_dirs(archive);
    if dirs.is_empty() {
        return None;
    }

    let stem = archive.file_stem();
    let Some(dir) = select_descriptor_dir(&dirs, &stem) else {
        debug!(
            path = %archive.path().display(),
            descriptors = dirs.len(),
            "Several embedded descriptors and none matches the file name"
        );
        return None;
    };

    let from_pom = dir
        .pom
        .as_deref()
        .and_then(|entry| read_pom(archive, entry))
        .unwrap_or_default();
    let from_properties = dir
        .properties
        .as_deref()
        .and_then(|entry| archive.read_entry_text(entry).ok())
        .map(|text| parse_pom_properties(&text))
        .unwrap_or_default();

    let fields = from_pom.or(from_properties);
    debug!(path = %archive.path().display(), ?fields, "Embedded descriptor");
    Some(fields.into_candidate())
}

/// Group descriptor entries by their `{groupId}/{artifactId}` directory.
fn find_descriptor_dirs(archive: &ArchiveHandle) -> Vec<DescriptorDir> {
    let mut dirs: BTreeMap<(String, String), DescriptorDir> = BTreeMap::new();

    for entry in archive.file_entries() {
        let Some(rest) = entry.strip_prefix(MAVEN_DESCRIPTOR_ROOT) else {
            continue;
        };
        let parts: Vec<&str> = rest.split('/').collect();
        let [group, artifact, file] = parts.as_slice() else {
            continue;
        };
        if group.is_empty() || artifact.is_empty() {
            continue;
        }

        let dir = dirs
            .entry((group.to_string(), artifact.to_string()))
            .or_insert_with(|| DescriptorDir {
                artifact_dir: artifact.to_string(),
                ..Default::default()
            });
        match *file {
            POM_FILE => dir.pom = Some(entry.to_string()),
            POM_PROPERTIES_FILE => dir.properties = Some(entry.to_string()),
            _ => {}
        }
    }

    dirs.into_values()
        .filter(|dir| dir.pom.is_some() || dir.properties.is_some())
        .collect()
}

/// Pick the descriptor describing the archive itself.
fn select_descriptor_dir<'a>(dirs: &'a [DescriptorDir], stem: &str) -> Option<&'a DescriptorDir> {
    let matching = dirs
        .iter()
        .filter(|dir| {
            let artifact = dir.artifact_dir.as_str();
            stem == artifact
                || stem
                    .strip_prefix(artifact)
                    .is_some_and(|rest| rest.starts_with('-'))
        })
        .max_by_key(|dir| dir.artifact_dir.len());

    match (matching, dirs) {
        (Some(dir), _) => Some(dir),
        (None, [only]) => Some(only),
        (None, _) => None,
    }
}

fn read_pom(archive: &mut ArchiveHandle, entry: &str) -> Option<PomFields> {
    let text = match archive.read_entry_text(entry) {
        Ok(text) => text,
        Err(e) => {
            debug!(entry, error = %e, "Embedded POM unreadable");
            return None;
        }
    };

    match parse_pom(&text) {
        Ok(fields) => Some(fields),
        Err(reason) => {
            warn!(
                path = %archive.path().display(),
                entry,
                reason = %reason,
                "Embedded POM is present but unparsable"
            );
            None
        }
    }
}

/// Parse the coordinate fields of a POM document.
///
/// `groupId` and `version` are inherited from `<parent>` when the project
/// does not declare them. `${...}` references are resolved against
/// `<properties>` and the `project.*` / `pom.*` / `project.parent.*` model
/// values; fields that remain unresolved are left empty.
///
/// # Examples
///
/// ```
/// use jarcoord::strategy::parse_pom;
///
/// let fields = parse_pom(r#"
///     <project>
///       <parent><groupId>org.example</groupId><version>2.0</version></parent>
///       <artifactId>widget</artifactId>
///     </project>"#).unwrap();
/// assert_eq!(fields.group_id.as_deref(), Some("org.example"));
/// assert_eq!(fields.version.as_deref(), Some("2.0"));
/// ```
pub fn parse_pom(text: &str) -> Result<PomFields, String> {
    let document = Document::parse(text).map_err(|e| e.to_string())?;
    let project = document.root_element();
    if project.tag_name().name() != "project" {
        return Err(format!(
            "root element is <{}>, expected <project>",
            project.tag_name().name()
        ));
    }

    let parent = child(&project, "parent");
    let parent_group = parent.as_ref().and_then(|p| node_text(p, "groupId"));
    let parent_artifact = parent.as_ref().and_then(|p| node_text(p, "artifactId"));
    let parent_version = parent.as_ref().and_then(|p| node_text(p, "version"));

    let raw_group = node_text(&project, "groupId").or_else(|| parent_group.clone());
    let raw_artifact = node_text(&project, "artifactId");
    let raw_version = node_text(&project, "version").or_else(|| parent_version.clone());
    let raw_packaging = node_text(&project, "packaging");

    let mut properties = parse_properties(&project);
    let model = [
        ("groupId", &raw_group),
        ("artifactId", &raw_artifact),
        ("version", &raw_version),
        ("packaging", &raw_packaging),
    ];
    for (name, value) in model {
        if let Some(value) = value {
            properties.insert(format!("project.{}", name), value.clone());
            properties.insert(format!("pom.{}", name), value.clone());
        }
    }
    let parent_model = [
        ("groupId", &parent_group),
        ("artifactId", &parent_artifact),
        ("version", &parent_version),
    ];
    for (name, value) in parent_model {
        if let Some(value) = value {
            properties.insert(format!("project.parent.{}", name), value.clone());
            properties.insert(format!("parent.{}", name), value.clone());
        }
    }

    let resolve = |value: Option<String>| value.and_then(|v| resolve_property(&v, &properties));
    Ok(PomFields {
        group_id: resolve(raw_group),
        artifact_id: resolve(raw_artifact),
        version: resolve(raw_version),
        packaging: resolve(raw_packaging),
    })
}

/// Parse a `pom.properties` file.
///
/// # Examples
///
/// ```
/// use jarcoord::strategy::parse_pom_properties;
///
/// let fields = parse_pom_properties("#Generated by Maven\nartifactId=widget\nversion=2.3.1\n");
/// assert_eq!(fields.artifact_id.as_deref(), Some("widget"));
/// assert_eq!(fields.group_id, None);
/// ```
pub fn parse_pom_properties(text: &str) -> PomFields {
    let mut fields = PomFields::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once(['=', ':']) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let slot = match key.trim() {
            "groupId" => &mut fields.group_id,
            "artifactId" => &mut fields.artifact_id,
            "version" => &mut fields.version,
            _ => continue,
        };
        *slot = Some(value.to_string());
    }

    fields
}

fn child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
}

fn node_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|c| c.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_properties(project: &Node<'_, '_>) -> HashMap<String, String> {
    child(project, "properties")
        .map(|props| {
            props
                .children()
                .filter(|c| c.is_element())
                .filter_map(|prop| {
                    let key = prop.tag_name().name().to_string();
                    let value = prop.text().map(|text| text.trim().to_string())?;
                    Some((key, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Expand `${name}` references, returning `None` if any stays unresolved.
fn resolve_property(value: &str, properties: &HashMap<String, String>) -> Option<String> {
    let mut current = value.trim().to_string();

    for _ in 0..MAX_PROPERTY_DEPTH {
        let Some(start) = current.find("${") else {
            break;
        };
        let end = start + current[start..].find('}')?;
        let name = &current[start + 2..end];
        let replacement = properties.get(name)?;
        current = format!("{}{}{}", &current[..start], replacement, &current[end + 1..]);
    }

    if current.contains("${") || current.is_empty() {
        return None;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::archive;
    use tempfile::TempDir;

    const WIDGET_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.example</groupId>
  <artifactId>widget</artifactId>
  <version>2.3.1</version>
  <packaging>jar</packaging>
  <dependencies>
    <dependency>
      <groupId>org.other</groupId>
      <artifactId>dep</artifactId>
      <version>9.9</version>
    </dependency>
  </dependencies>
</project>"#;

    #[test]
    fn test_parse_complete_pom() {
        let fields = parse_pom(WIDGET_POM).unwrap();
        assert_eq!(fields.group_id.as_deref(), Some("org.example"));
        assert_eq!(fields.artifact_id.as_deref(), Some("widget"));
        assert_eq!(fields.version.as_deref(), Some("2.3.1"));
        assert_eq!(fields.packaging.as_deref(), Some("jar"));
    }

    #[test]
    fn test_parse_inherits_from_parent() {
        let fields = parse_pom(
            r#"<project>
                 <parent>
                   <groupId>org.example</groupId>
                   <artifactId>parent</artifactId>
                   <version>5.0.1</version>
                 </parent>
                 <artifactId>child</artifactId>
               </project>"#,
        )
        .unwrap();
        assert_eq!(fields.group_id.as_deref(), Some("org.example"));
        assert_eq!(fields.artifact_id.as_deref(), Some("child"));
        assert_eq!(fields.version.as_deref(), Some("5.0.1"));
        assert_eq!(fields.packaging, None);
    }

    #[test]
    fn test_parse_resolves_properties() {
        let fields = parse_pom(
            r#"<project>
                 <parent><groupId>org.example</groupId><version>1.0</version></parent>
                 <groupId>${project.parent.groupId}.tools</groupId>
                 <artifactId>tool</artifactId>
                 <version>${tool.major}.${tool.minor}</version>
                 <properties>
                   <tool.major>3</tool.major>
                   <tool.minor>${minor}</tool.minor>
                   <minor>4</minor>
                 </properties>
               </project>"#,
        )
        .unwrap();
        assert_eq!(fields.group_id.as_deref(), Some("org.example.tools"));
        assert_eq!(fields.version.as_deref(), Some("3.4"));
    }

    #[test]
    fn test_parse_drops_unresolved_fields() {
        let fields = parse_pom(
            r#"<project>
                 <groupId>org.example</groupId>
                 <artifactId>widget</artifactId>
                 <version>${revision}</version>
               </project>"#,
        )
        .unwrap();
        assert_eq!(fields.version, None);
        assert_eq!(fields.artifact_id.as_deref(), Some("widget"));
    }

    #[test]
    fn test_parse_rejects_self_reference_loop() {
        let fields = parse_pom(
            r#"<project>
                 <artifactId>a</artifactId>
                 <version>${v}</version>
                 <properties><v>${v}</v></properties>
               </project>"#,
        )
        .unwrap();
        assert_eq!(fields.version, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_pom("<project><groupId>").is_err());
        assert!(parse_pom("<settings/>").unwrap_err().contains("settings"));
    }

    #[test]
    fn test_parse_pom_properties() {
        let fields = parse_pom_properties(
            "#Generated by Maven\n#Tue Jan 01 00:00:00 UTC 2024\n\
             groupId=org.example\nartifactId=widget\nversion = 2.3.1\nother=x\n",
        );
        assert_eq!(fields.group_id.as_deref(), Some("org.example"));
        assert_eq!(fields.artifact_id.as_deref(), Some("widget"));
        assert_eq!(fields.version.as_deref(), Some("2.3.1"));
    }

    #[test]
    fn test_resolve_property() {
        let mut properties = HashMap::new();
        properties.insert("a".to_string(), "1".to_string());
        assert_eq!(resolve_property("${a}.0", &properties).as_deref(), Some("1.0"));
        assert_eq!(resolve_property("${b}", &properties), None);
        assert_eq!(resolve_property("${a", &properties), None);
        assert_eq!(resolve_property("plain", &properties).as_deref(), Some("plain"));
    }

    #[test]
    fn test_extract_from_archive() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(
            dir.path(),
            "renamed.jar",
            &[("META-INF/maven/org.example/widget/pom.xml", WIDGET_POM)],
        );

        let candidate = extract(&mut handle).unwrap();
        assert_eq!(candidate.confidence(), Confidence::EmbeddedDescriptor);
        assert_eq!(candidate.group_id(), Some("org.example"));
        assert_eq!(candidate.artifact_id(), Some("widget"));
        assert_eq!(candidate.version(), Some("2.3.1"));
        assert_eq!(candidate.declared_packaging(), Some("jar"));
    }

    #[test]
    fn test_extract_fills_gaps_from_properties() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(
            dir.path(),
            "widget.jar",
            &[
                (
                    "META-INF/maven/org.example/widget/pom.xml",
                    "<project><groupId>org.example</groupId><artifactId>widget</artifactId>\
                     <version>${revision}</version></project>",
                ),
                (
                    "META-INF/maven/org.example/widget/pom.properties",
                    "groupId=org.example\nartifactId=widget\nversion=4.1.0\n",
                ),
            ],
        );

        let candidate = extract(&mut handle).unwrap();
        assert_eq!(candidate.version(), Some("4.1.0"));
    }

    #[test]
    fn test_extract_unparsable_pom_falls_back_to_properties() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(
            dir.path(),
            "widget.jar",
            &[
                ("META-INF/maven/org.example/widget/pom.xml", "<project><broken"),
                (
                    "META-INF/maven/org.example/widget/pom.properties",
                    "groupId=org.example\nartifactId=widget\nversion=1.0\n",
                ),
            ],
        );

        let candidate = extract(&mut handle).unwrap();
        assert_eq!(candidate.group_id(), Some("org.example"));
        assert!(candidate.is_complete());
    }

    #[test]
    fn test_extract_unparsable_pom_alone_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(
            dir.path(),
            "widget.jar",
            &[("META-INF/maven/org.example/widget/pom.xml", "not xml at all")],
        );

        let candidate = extract(&mut handle).unwrap();
        assert!(candidate.is_empty());
    }

    #[test]
    fn test_extract_without_descriptor() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(dir.path(), "widget.jar", &[("com/acme/A.class", "x")]);
        assert!(extract(&mut handle).is_none());
    }

    #[test]
    fn test_shaded_archive_prefers_matching_descriptor() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(
            dir.path(),
            "app-core-1.2.jar",
            &[
                (
                    "META-INF/maven/org.dep/app/pom.properties",
                    "groupId=org.dep\nartifactId=app\nversion=0.1\n",
                ),
                (
                    "META-INF/maven/com.acme/app-core/pom.properties",
                    "groupId=com.acme\nartifactId=app-core\nversion=1.2\n",
                ),
                (
                    "META-INF/maven/org.slf4j/slf4j-api/pom.properties",
                    "groupId=org.slf4j\nartifactId=slf4j-api\nversion=2.0.9\n",
                ),
            ],
        );

        let candidate = extract(&mut handle).unwrap();
        assert_eq!(candidate.group_id(), Some("com.acme"));
        assert_eq!(candidate.artifact_id(), Some("app-core"));
    }

    #[test]
    fn test_ambiguous_shaded_archive_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(
            dir.path(),
            "bundle.jar",
            &[
                ("META-INF/maven/a/one/pom.properties", "artifactId=one\n"),
                ("META-INF/maven/b/two/pom.properties", "artifactId=two\n"),
            ],
        );
        assert!(extract(&mut handle).is_none());
    }
}
