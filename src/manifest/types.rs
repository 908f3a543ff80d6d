use serde::{Deserialize, Serialize};

/// One vendored package, appended per (organization, project) leaf and never
/// mutated afterwards. Field names are the binding external contract other
/// tooling reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageEntry {
    /// Recursive SHA-1 content hash of the vendored directory.
    #[serde(rename = "checksumSHA1")]
    pub checksum_sha1: String,

    /// Source URL/path; equals `path` unless a territory prefix applies.
    pub origin: String,

    /// Vendor-relative path, `site/organization/project`.
    pub path: String,

    /// Commit id of the vendored source.
    pub revision: String,

    /// Commit timestamp, RFC 3339 UTC.
    #[serde(rename = "revisionTime")]
    pub revision_time: String,
}

/// The `vendor.json` record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VendorManifest {
    pub comment: String,
    pub ignore: String,
    pub package: Vec<PackageEntry>,
    #[serde(rename = "rootPath")]
    pub root_path: String,
}

impl VendorManifest {
    /// Create an empty manifest owned by `root_path`.
    #[must_use]
    pub fn new(root_path: &str) -> Self {
        Self {
            comment: String::new(),
            ignore: "test".to_string(),
            package: Vec::new(),
            root_path: root_path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> PackageEntry {
        PackageEntry {
            checksum_sha1: "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d".to_string(),
            origin: "github.com/AviatrixSystems/go-aviatrix".to_string(),
            path: "github.com/AviatrixSystems/go-aviatrix".to_string(),
            revision: "abc1230000000000000000000000000000000000".to_string(),
            revision_time: "2020-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_new_manifest_defaults() {
        let manifest = VendorManifest::new("github.com/example/project");
        assert_eq!(manifest.comment, "");
        assert_eq!(manifest.ignore, "test");
        assert!(manifest.package.is_empty());
        assert_eq!(manifest.root_path, "github.com/example/project");
    }

    #[test]
    fn test_entry_serialized_field_names() {
        let json = serde_json::to_string(&sample_entry()).expect("Should serialize");
        assert!(json.contains("\"checksumSHA1\""));
        assert!(json.contains("\"revisionTime\""));
        assert!(json.contains("\"origin\""));
        assert!(json.contains("\"path\""));
        assert!(json.contains("\"revision\""));
        assert!(!json.contains("checksum_sha1"));
        assert!(!json.contains("revision_time"));
    }

    #[test]
    fn test_manifest_serialized_field_names() {
        let mut manifest = VendorManifest::new("github.com/example/project");
        manifest.package.push(sample_entry());

        let json = serde_json::to_string(&manifest).expect("Should serialize");
        assert!(json.contains("\"comment\""));
        assert!(json.contains("\"ignore\""));
        assert!(json.contains("\"package\""));
        assert!(json.contains("\"rootPath\""));
        assert!(!json.contains("root_path"));
    }

    #[test]
    fn test_round_trip_is_structurally_identical() {
        let mut manifest = VendorManifest::new("github.com/example/project");
        manifest.package.push(sample_entry());
        manifest.package.push(PackageEntry {
            checksum_sha1: "7c211433f02071597741e6ff5a8ea34789abbf43".to_string(),
            origin: "github.com/hashicorp/terraform/vendor/golang.org/x/crypto".to_string(),
            path: "golang.org/x/crypto".to_string(),
            revision: "def4560000000000000000000000000000000000".to_string(),
            revision_time: "2019-06-15T12:00:00Z".to_string(),
        });

        let json = serde_json::to_string_pretty(&manifest).expect("Should serialize");
        let parsed: VendorManifest = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(manifest, parsed);
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let mut manifest = VendorManifest::new("github.com/example/project");
        for name in ["b", "a", "c"] {
            let mut entry = sample_entry();
            entry.path = format!("github.com/org/{name}");
            manifest.package.push(entry);
        }

        let json = serde_json::to_string(&manifest).expect("Should serialize");
        let parsed: VendorManifest = serde_json::from_str(&json).expect("Should deserialize");
        let paths: Vec<&str> = parsed.package.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["github.com/org/b", "github.com/org/a", "github.com/org/c"]
        );
    }

    #[test]
    fn test_pretty_output_uses_two_space_indent() {
        let manifest = VendorManifest::new("github.com/example/project");
        let json = serde_json::to_string_pretty(&manifest).expect("Should serialize");
        assert!(json.contains("\n  \"comment\""));
    }
}
