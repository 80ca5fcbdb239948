//! Parser for JetBrains run configuration XML files.
//!
//! One configuration per file; dispatch is entirely on the configuration's
//! `type` attribute, and each supported type has a fixed required-field
//! contract. A violated contract skips that configuration with a warning;
//! only unreadable files and invalid XML fail a single-file parse.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::classify::Flavor;
use crate::model::{ParseOutcome, Task, TaskKind};
use crate::schema::jetbrains::{self, Configuration};

use super::resolve_jetbrains_path;

pub struct RunConfigurationParser {
    project_root: PathBuf,
}

impl RunConfigurationParser {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        RunConfigurationParser {
            project_root: project_root.into(),
        }
    }

    /// Parse every `.xml` file in a runConfigurations directory, in file name
    /// order. Unreadable or syntactically broken files are downgraded to
    /// warnings here so one bad file cannot hide the rest of the directory.
    pub fn parse_dir(&self, dir: &Path) -> anyhow::Result<ParseOutcome> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("xml"))
            .collect();
        paths.sort();

        let mut outcome = ParseOutcome::default();
        for path in paths {
            match self.parse_file(&path) {
                Ok(one) => outcome.merge(one),
                Err(e) => outcome.warn(path.display().to_string(), format!("{e:#}")),
            }
        }
        Ok(outcome)
    }

    pub fn parse_file(&self, path: &Path) -> anyhow::Result<ParseOutcome> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let file = jetbrains::from_xml(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let mut outcome = ParseOutcome::default();
        let cfg = file.configuration;
        match self.convert_configuration(&cfg, path) {
            Ok(task) => outcome.tasks.push(task),
            Err(reason) => outcome.warn(cfg.name.as_str(), reason),
        }
        Ok(outcome)
    }

    fn convert_configuration(&self, cfg: &Configuration, source: &Path) -> Result<Task, String> {
        if cfg.name.trim().is_empty() {
            return Err("configuration has no name attribute".to_string());
        }

        let mut task = Task::new(&cfg.name, TaskKind::JetBrains, source);
        task.description = Some(format!("JetBrains {} configuration", cfg.kind));

        match cfg.kind.as_str() {
            "Application" => self.fill_application(cfg, &mut task)?,
            "GradleRunConfiguration" => self.fill_gradle(cfg, &mut task)?,
            "GoApplicationRunConfiguration" => self.fill_go(cfg, &mut task),
            "NodeJSConfigurationType" => self.fill_node(cfg, &mut task)?,
            "PythonConfigurationType" => self.fill_python(cfg, &mut task)?,
            "ShellScript" => self.fill_shell(cfg, &mut task)?,
            other => return Err(format!("unsupported configuration type: {other}")),
        }

        if let Some(dir) = cfg.option_value("WORKING_DIRECTORY") {
            if !dir.is_empty() {
                task.cwd = resolve_jetbrains_path(&self.project_root, dir);
            }
        }
        if task.cwd.is_empty() {
            task.cwd = self.project_root.to_string_lossy().into_owned();
        }

        if let Some(map) = cfg.option("ENV_VARIABLES").and_then(|o| o.map.as_ref()) {
            for entry in &map.entries {
                task.env.insert(entry.key.clone(), entry.value.clone());
            }
        }

        Ok(task)
    }

    fn fill_application(&self, cfg: &Configuration, task: &mut Task) -> Result<(), String> {
        task.command = "java".to_string();
        task.group = Some("run".to_string());
        task.hint = Some(Flavor::Java);

        let main_class = cfg
            .option_value("MAIN_CLASS_NAME")
            .filter(|v| !v.is_empty())
            .ok_or("MAIN_CLASS_NAME is required for Application configuration")?;

        if let Some(vm) = cfg.option_value("VM_PARAMETERS") {
            task.args.extend(split_parameters(vm));
        }
        task.args.push(main_class.to_string());
        if let Some(params) = cfg.option_value("PROGRAM_PARAMETERS") {
            task.args.extend(split_parameters(params));
        }
        Ok(())
    }

    fn fill_gradle(&self, cfg: &Configuration, task: &mut Task) -> Result<(), String> {
        task.command = "gradle".to_string();
        task.group = Some("build".to_string());
        task.hint = Some(Flavor::Gradle);

        let settings = cfg
            .external_system_settings
            .as_ref()
            .ok_or("ExternalSystemSettings is required for Gradle configuration")?;

        if let Some(list) = settings.option("taskNames").and_then(|o| o.list.as_ref()) {
            task.args
                .extend(list.options.iter().map(|v| v.value.clone()));
        }
        if let Some(params) = settings.option_value("scriptParameters") {
            task.args.extend(split_parameters(params));
        }
        Ok(())
    }

    fn fill_go(&self, cfg: &Configuration, task: &mut Task) {
        task.command = "go".to_string();
        task.group = Some("run".to_string());
        task.hint = Some(Flavor::Go);

        task.args.push("run".to_string());
        let package = cfg
            .option_value("PACKAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or(".");
        task.args.push(package.to_string());
        if let Some(params) = cfg.option_value("PROGRAM_PARAMETERS") {
            task.args.extend(split_parameters(params));
        }
    }

    fn fill_node(&self, cfg: &Configuration, task: &mut Task) -> Result<(), String> {
        task.command = "node".to_string();
        task.group = Some("run".to_string());
        task.hint = Some(Flavor::Node);

        let js_file = cfg
            .option_value("PATH_TO_JS_FILE")
            .filter(|v| !v.is_empty())
            .ok_or("PATH_TO_JS_FILE is required for NodeJS configuration")?;
        task.args
            .push(resolve_jetbrains_path(&self.project_root, js_file));
        if let Some(params) = cfg.option_value("APPLICATION_PARAMETERS") {
            task.args.extend(split_parameters(params));
        }
        Ok(())
    }

    fn fill_python(&self, cfg: &Configuration, task: &mut Task) -> Result<(), String> {
        task.command = "python".to_string();
        task.group = Some("run".to_string());
        task.hint = Some(Flavor::Python);

        let script = cfg
            .option_value("SCRIPT_NAME")
            .filter(|v| !v.is_empty())
            .ok_or("SCRIPT_NAME is required for Python configuration")?;
        task.args
            .push(resolve_jetbrains_path(&self.project_root, script));
        if let Some(params) = cfg.option_value("PARAMETERS") {
            task.args.extend(split_parameters(params));
        }
        Ok(())
    }

    fn fill_shell(&self, cfg: &Configuration, task: &mut Task) -> Result<(), String> {
        let script = cfg
            .option_value("SCRIPT_TEXT")
            .filter(|v| !v.is_empty())
            .ok_or("SCRIPT_TEXT is required for ShellScript configuration")?;
        // The script line stays a single command string; converters that need
        // an executable split it on whitespace.
        task.command = script.to_string();
        task.hint = Some(Flavor::Shell);
        Ok(())
    }
}

/// Split a parameter string on spaces with single/double quote support;
/// quotes group words and are not kept in the output.
pub(crate) fn split_parameters(params: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in params.chars() {
        match quote {
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            Some(q) if ch == q => quote = None,
            None if ch == ' ' => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    const APPLICATION: &str = r#"<component name="ProjectRunConfigurationManager">
  <configuration name="Application" type="Application" factoryName="Application">
    <option name="MAIN_CLASS_NAME" value="com.example.Main"/>
    <option name="VM_PARAMETERS" value="-Xmx1024m"/>
    <option name="PROGRAM_PARAMETERS" value="--port 8080"/>
    <option name="WORKING_DIRECTORY" value="$PROJECT_DIR$"/>
    <option name="ENV_VARIABLES">
      <map>
        <entry key="DEBUG" value="true"/>
      </map>
    </option>
    <method v="2"/>
  </configuration>
</component>"#;

    const GRADLE: &str = r#"<component name="ProjectRunConfigurationManager">
  <configuration name="Gradle Build" type="GradleRunConfiguration" factoryName="Gradle">
    <ExternalSystemSettings>
      <option name="taskNames">
        <list>
          <option value="clean"/>
          <option value="build"/>
        </list>
      </option>
      <option name="scriptParameters" value="--info --stacktrace"/>
    </ExternalSystemSettings>
  </configuration>
</component>"#;

    #[test]
    fn parses_application_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "Application.xml", APPLICATION);
        let outcome = RunConfigurationParser::new(dir.path())
            .parse_file(&path)
            .unwrap();
        assert!(outcome.warnings.is_empty());

        let task = &outcome.tasks[0];
        assert_eq!(task.name, "Application");
        assert_eq!(task.kind, TaskKind::JetBrains);
        assert_eq!(task.command, "java");
        assert_eq!(task.group.as_deref(), Some("run"));
        assert_eq!(task.hint, Some(Flavor::Java));
        assert_eq!(task.args, vec!["-Xmx1024m", "com.example.Main", "--port", "8080"]);
        assert_eq!(task.cwd, dir.path().to_string_lossy());
        assert_eq!(task.env.get("DEBUG").map(String::as_str), Some("true"));
        assert_eq!(
            task.description.as_deref(),
            Some("JetBrains Application configuration")
        );
    }

    #[test]
    fn parses_gradle_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "Gradle_Build.xml", GRADLE);
        let outcome = RunConfigurationParser::new(dir.path())
            .parse_file(&path)
            .unwrap();
        let task = &outcome.tasks[0];
        assert_eq!(task.command, "gradle");
        assert_eq!(task.group.as_deref(), Some("build"));
        assert_eq!(task.args, vec!["clean", "build", "--info", "--stacktrace"]);
    }

    #[test]
    fn missing_main_class_is_a_warning_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "Broken.xml",
            r#"<component name="ProjectRunConfigurationManager">
  <configuration name="Broken" type="Application">
    <option name="VM_PARAMETERS" value="-Xmx512m"/>
  </configuration>
</component>"#,
        );
        let outcome = RunConfigurationParser::new(dir.path())
            .parse_file(&path)
            .unwrap();
        assert!(outcome.tasks.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].reason.contains("MAIN_CLASS_NAME"));
    }

    #[test]
    fn directory_scan_collects_all_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "b_gradle.xml", GRADLE);
        write_config(dir.path(), "a_app.xml", APPLICATION);
        write_config(dir.path(), "notes.txt", "ignored");

        let outcome = RunConfigurationParser::new(dir.path())
            .parse_dir(dir.path())
            .unwrap();
        assert_eq!(outcome.tasks.len(), 2);
        assert_eq!(outcome.tasks[0].name, "Application");
        assert_eq!(outcome.tasks[1].name, "Gradle Build");
    }

    #[test]
    fn parses_shell_script_with_multi_token_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "build.xml",
            r#"<component name="ProjectRunConfigurationManager">
  <configuration name="build" type="ShellScript">
    <option name="SCRIPT_TEXT" value="go build -o bin/app"/>
    <option name="WORKING_DIRECTORY" value="$PROJECT_DIR$"/>
  </configuration>
</component>"#,
        );
        let outcome = RunConfigurationParser::new(dir.path())
            .parse_file(&path)
            .unwrap();
        let task = &outcome.tasks[0];
        assert_eq!(task.command, "go build -o bin/app");
        assert!(task.args.is_empty());
    }

    #[test]
    fn splits_parameters_with_quotes() {
        assert_eq!(
            split_parameters("--port 8080 --debug"),
            vec!["--port", "8080", "--debug"]
        );
        assert_eq!(
            split_parameters(r#"--config "test file.properties" --name 'My App'"#),
            vec!["--config", "test file.properties", "--name", "My App"]
        );
        assert_eq!(
            split_parameters(r#"-Xmx512m -Dprop="quoted value" --flag"#),
            vec!["-Xmx512m", "-Dprop=quoted value", "--flag"]
        );
        assert!(split_parameters("").is_empty());
    }
}
