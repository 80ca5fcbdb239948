//! Serde types for JetBrains run configuration XML, read and written through
//! quick-xml.
//!
//! The on-disk shape is a `<component>` root wrapping one `<configuration>`
//! with name/type attributes and a flat list of `<option name value>`
//! elements. Two options carry nested payloads instead of a value attribute:
//! a `<map>` of `<entry key value>` pairs (environment variables) and a
//! `<list>` of `<option value>` children (build-tool task names). Gradle-style
//! configurations keep their options inside an `<ExternalSystemSettings>`
//! child instead of the flat list.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// `name` attribute of the root component element.
pub const COMPONENT_NAME: &str = "ProjectRunConfigurationManager";

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Root of one run configuration file.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunConfigurationFile {
    #[serde(rename = "@name")]
    pub name: String,
    pub configuration: Configuration,
}

impl RunConfigurationFile {
    pub fn new(configuration: Configuration) -> Self {
        RunConfigurationFile {
            name: COMPONENT_NAME.to_string(),
            configuration,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(
        rename = "@factoryName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub factory_name: Option<String>,
    #[serde(rename = "@default", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(rename = "option", default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionElement>,
    #[serde(rename = "module", default, skip_serializing_if = "Option::is_none")]
    pub module: Option<Module>,
    #[serde(
        rename = "ExternalSystemSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_system_settings: Option<ExternalSystemSettings>,
    #[serde(rename = "method", default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
}

impl Configuration {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Configuration {
            name: name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn push_value(&mut self, name: &str, value: impl Into<String>) {
        self.options.push(OptionElement::value(name, value));
    }

    /// Flat option lookup by name attribute.
    pub fn option(&self, name: &str) -> Option<&OptionElement> {
        self.options
            .iter()
            .find(|o| o.name.as_deref() == Some(name))
    }

    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(|o| o.value.as_deref())
    }
}

/// A single `<option>` element: either a name/value pair or a named carrier
/// of a nested map or list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OptionElement {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "map", default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapElement>,
    #[serde(rename = "list", default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListElement>,
}

impl OptionElement {
    pub fn value(name: &str, value: impl Into<String>) -> Self {
        OptionElement {
            name: Some(name.to_string()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn map<I, K, V>(name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        OptionElement {
            name: Some(name.to_string()),
            map: Some(MapElement {
                entries: entries
                    .into_iter()
                    .map(|(k, v)| EntryElement {
                        key: k.into(),
                        value: v.into(),
                    })
                    .collect(),
            }),
            ..Default::default()
        }
    }

    pub fn list<I, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        OptionElement {
            name: Some(name.to_string()),
            list: Some(ListElement {
                options: values
                    .into_iter()
                    .map(|v| ListValue { value: v.into() })
                    .collect(),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MapElement {
    #[serde(rename = "entry", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntryElement>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryElement {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "@value")]
    pub value: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListElement {
    #[serde(rename = "option", default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ListValue>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListValue {
    #[serde(rename = "@value")]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "@name")]
    pub name: String,
}

/// Before-run method block. Carried through verbatim; the engine neither
/// interprets nor generates before-run steps.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Method {
    #[serde(rename = "@v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "option", default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionElement>,
}

/// Option bag used by Gradle-family configurations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExternalSystemSettings {
    #[serde(rename = "option", default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionElement>,
}

impl ExternalSystemSettings {
    pub fn option(&self, name: &str) -> Option<&OptionElement> {
        self.options
            .iter()
            .find(|o| o.name.as_deref() == Some(name))
    }

    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(|o| o.value.as_deref())
    }
}

/// Parse one run configuration document.
pub fn from_xml(content: &str) -> anyhow::Result<RunConfigurationFile> {
    quick_xml::de::from_str(content).context("invalid run configuration XML")
}

/// Serialize one run configuration document with the conventional header and
/// two-space indentation.
pub fn to_xml(file: &RunConfigurationFile) -> anyhow::Result<String> {
    let mut body = String::new();
    let mut ser = quick_xml::se::Serializer::with_root(&mut body, Some("component"))
        .context("xml serializer")?;
    ser.indent(' ', 2);
    file.serialize(ser).context("serialize run configuration")?;
    Ok(format!("{XML_HEADER}{body}\n"))
}
