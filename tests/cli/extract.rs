use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const CONFIG: &str = r#"{
  "supportedLocales": ["en-US", "pl-PL"],
  "defaultLocale": "en-US"
}"#;

const PAGE: &str = r#"import { $translate as t, $plural } from 'qwik-speak';

export default component$(() => {
  const count = useSignal(1);
  return (
    <>
      <h1>{t('app.title@@Qwik Speak')}</h1>
      <p>{t('home.text@@Hello {{name}}', { name: 'Rust' })}</p>
      <p>{t(dynamicKey)}</p>
      <p>{$plural(count.value, 'home.devs')}</p>
    </>
  );
});
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(".tolkrc.json", CONFIG)?;
    test.write_file("src/routes/index.tsx", PAGE)?;
    Ok(test)
}

#[test]
fn test_extract_writes_assets() -> Result<()> {
    let test = project()?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Wrote i18n/en-US/app.json\n\
         Wrote i18n/en-US/home.json\n\
         Wrote i18n/pl-PL/app.json\n\
         Wrote i18n/pl-PL/home.json\n\
         extracted keys: 6\n\
         translations skipped due to dynamic keys: 1\n\
         plurals skipped due to dynamic keys/options: 0\n\
         \u{2713} Extracted 6 keys from 1 source file\n"
    );

    assert_eq!(
        test.read_file("i18n/en-US/app.json")?,
        "{\n  \"app\": {\n    \"title\": \"Qwik Speak\"\n  }\n}\n"
    );
    let home: Value = serde_json::from_str(&test.read_file("i18n/pl-PL/home.json")?)?;
    assert_eq!(
        home,
        json!({
            "home": {
                "devs": { "few": "", "many": "", "one": "", "other": "" },
                "text": "Hello {{name}}",
            }
        })
    );

    Ok(())
}

#[test]
fn test_extract_keeps_existing_translations() -> Result<()> {
    let test = project()?;
    test.write_file(
        "i18n/pl-PL/app.json",
        r#"{"app": {"title": "Qwik Speak PL"}, "legacy": "kept"}"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let app: Value = serde_json::from_str(&test.read_file("i18n/pl-PL/app.json")?)?;
    assert_eq!(
        app,
        json!({ "app": { "title": "Qwik Speak PL" }, "legacy": "kept" })
    );

    Ok(())
}

#[test]
fn test_extract_locale_override() -> Result<()> {
    let test = project()?;

    let output = test
        .extract_command()
        .args(["--locale", "de-DE", "--default-locale", "de-DE"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("i18n/de-DE/app.json").exists());
    assert!(!test.root().join("i18n/en-US").exists());

    Ok(())
}

#[test]
fn test_extract_with_root_flag() -> Result<()> {
    let test = project()?;
    let outside = tempfile::TempDir::new()?;

    let output = test
        .extract_command()
        .current_dir(outside.path())
        .arg("--root")
        .arg(test.root())
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("i18n/en-US/app.json").exists());

    Ok(())
}

#[test]
fn test_extract_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".tolkrc.json", r#"{"supportedLocales": []}"#)?;
    test.write_file("src/index.ts", "")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: 'supportedLocales'"));

    Ok(())
}

#[test]
fn test_extract_missing_source_root() -> Result<()> {
    let test = CliTest::with_file(".tolkrc.json", CONFIG)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source path does not exist"));

    Ok(())
}
