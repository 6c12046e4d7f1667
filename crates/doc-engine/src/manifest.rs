//! Reading package metadata from `package.json`.

use camino::Utf8Path;
use serde::Deserialize;

use crate::error::{DocsError, Result};
use crate::model::PackageInfo;

/// `author` may be a plain string or an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Person {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        email: Option<String>,
    },
}

/// `repository` may be a URL string or `{ "type": "git", "url": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Repository {
    Url(String),
    Detailed { url: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    name: String,
    version: String,
    description: String,
    author: Option<Person>,
    repository: Option<Repository>,
    license: String,
    homepage: String,
    keywords: Vec<String>,
}

impl From<Manifest> for PackageInfo {
    fn from(m: Manifest) -> Self {
        PackageInfo {
            name: m.name,
            version: m.version,
            description: m.description,
            author: match m.author {
                Some(Person::Name(name)) => name,
                Some(Person::Detailed {
                    name,
                    email: Some(email),
                }) => format!("{name} <{email}>"),
                Some(Person::Detailed { name, email: None }) => name,
                None => String::new(),
            },
            repository: match m.repository {
                Some(Repository::Url(url) | Repository::Detailed { url }) => url,
                None => String::new(),
            },
            license: m.license,
            homepage: m.homepage,
            keywords: m.keywords,
        }
    }
}

/// Extract [`PackageInfo`] from manifest text.
pub fn parse_package_info(text: &str) -> serde_json::Result<PackageInfo> {
    serde_json::from_str::<Manifest>(text).map(PackageInfo::from)
}

/// Read the manifest at `path`. A manifest that cannot be read is an error;
/// one that is not valid JSON yields the default metadata.
pub async fn load_package_info(path: &Utf8Path) -> Result<PackageInfo> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DocsError::io(path, e))?;
    match parse_package_info(&text) {
        Ok(info) => Ok(info),
        Err(error) => {
            tracing::warn!(%path, %error, "malformed package manifest, using empty metadata");
            Ok(PackageInfo::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_string_fields() {
        let info = parse_package_info(
            r#"{"name":"utilkit","version":"2.1.0","license":"MIT","author":"Ada","repository":"https://example.com/utilkit.git","keywords":["utility"],"scripts":{"build":"tsc"}}"#,
        )
        .unwrap();
        assert_eq!(info.name, "utilkit");
        assert_eq!(info.author, "Ada");
        assert_eq!(info.repository, "https://example.com/utilkit.git");
        assert_eq!(info.keywords, vec!["utility"]);
        assert_eq!(info.homepage, "");
    }

    #[test]
    fn reads_object_fields() {
        let info = parse_package_info(
            r#"{"author":{"name":"Ada","email":"ada@example.com"},"repository":{"type":"git","url":"git+https://example.com/u.git"}}"#,
        )
        .unwrap();
        assert_eq!(info.author, "Ada <ada@example.com>");
        assert_eq!(info.repository, "git+https://example.com/u.git");
        assert_eq!(info.name, "");
    }

    #[test]
    fn invalid_json_is_an_error_here() {
        assert!(parse_package_info("{ name: ").is_err());
    }
}
