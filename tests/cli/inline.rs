use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const CONFIG: &str = r#"{
  "supportedLocales": ["en-US", "pl-PL"],
  "defaultLocale": "en-US"
}"#;

const CHUNK: &str = "const n=3;export const a=$translate(\"app.title\"),b=$plural(n,\"app.devs\");";

fn project(pl_devs: &str) -> Result<CliTest> {
    let test = CliTest::with_file(".tolkrc.json", CONFIG)?;
    test.write_file("dist/build/q-abc.js", CHUNK)?;
    test.write_file(
        "i18n/en-US/app.json",
        r#"{"app": {"title": "Hello", "devs": {"one": "one dev", "other": "{{value}} devs"}}}"#,
    )?;
    test.write_file(
        "i18n/pl-PL/app.json",
        &format!(r#"{{"app": {{"title": "Czesc", "devs": {}}}}}"#, pl_devs),
    )?;
    Ok(test)
}

const PL_DEVS: &str = r#"{"one": "jeden programista", "few": "{{value}} programisci", "many": "{{value}} programistow", "other": "{{value}} programisty"}"#;

#[test]
fn test_inline_writes_locale_chunks() -> Result<()> {
    let test = project(PL_DEVS)?;

    let output = test.inline_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "\u{2713} Inlined 1 chunk for 2 locales\n");
    assert_eq!(stderr(&output), "");

    assert_eq!(
        test.read_file("dist/build/en-US/q-abc.js")?,
        "const n=3;export const a=`Hello`,\
         b=(new Intl.PluralRules(`en-US`).select(+(n)) === `one` && `one dev` || `${n} devs`);"
    );
    assert_eq!(
        test.read_file("dist/build/pl-PL/q-abc.js")?,
        "const n=3;export const a=`Czesc`,\
         b=(new Intl.PluralRules(`pl-PL`).select(+(n)) === `one` && `jeden programista` \
         || new Intl.PluralRules(`pl-PL`).select(+(n)) === `few` && `${n} programisci` \
         || new Intl.PluralRules(`pl-PL`).select(+(n)) === `many` && `${n} programistow` \
         || `${n} programisty`);"
    );
    assert_eq!(
        test.read_file("dist/build/q-abc.js")?,
        test.read_file("dist/build/en-US/q-abc.js")?
    );

    let log = test.read_file("tolk-inline.log")?;
    assert_eq!(log.lines().count(), 2);

    Ok(())
}

#[test]
fn test_inline_missing_values_warn() -> Result<()> {
    let test = project(r#"{"one": "jeden", "other": "wiele"}"#)?;

    let output = test.inline_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stderr(&output),
        "warning: 2 missing values, 0 dynamic calls skipped (see tolk-inline.log or use -v)\n"
    );
    let log = test.read_file("tolk-inline.log")?;
    assert!(log.contains(
        "q-abc.js:\n\
         pl-PL - missing value for key: app.devs.few\n\
         pl-PL - missing value for key: app.devs.many\n"
    ));

    Ok(())
}

#[test]
fn test_inline_deny_missing_fails() -> Result<()> {
    let test = project(r#"{"one": "jeden", "other": "wiele"}"#)?;

    let output = test.inline_command().arg("--deny-missing").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "\u{2713} Inlined 1 chunk for 2 locales\n\
         \u{2718} 2 missing translation values (see tolk-inline.log)\n"
    );

    Ok(())
}

#[test]
fn test_inline_verbose_lists_findings() -> Result<()> {
    let test = project(PL_DEVS)?;
    test.write_file("dist/build/q-dyn.js", "export const x=$translate(someKey);")?;

    let output = test.inline_command().arg("-v").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Wrote dist/build/pl-PL/q-dyn.js\n"));
    assert!(out.contains("q-dyn.js  dynamic key: $translate(someKey) - skip\n"));
    assert!(out.ends_with("\u{2713} Inlined 2 chunks for 2 locales\n"));

    Ok(())
}

#[test]
fn test_inline_out_dir_override() -> Result<()> {
    let test = project(PL_DEVS)?;
    test.write_file("public/build/q-1.js", "$translate('app.title')")?;

    let output = test
        .inline_command()
        .args(["--out-dir", "public", "--locale", "pl-PL", "--default-locale", "pl-PL"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("public/build/pl-PL/q-1.js")?, "`Czesc`");
    assert_eq!(test.read_file("public/build/q-1.js")?, "`Czesc`");
    assert!(!test.root().join("dist/build/pl-PL").exists());

    Ok(())
}

#[test]
fn test_inline_missing_assets_fails() -> Result<()> {
    let test = CliTest::with_file(".tolkrc.json", CONFIG)?;
    test.write_file("dist/build/q-abc.js", CHUNK)?;

    let output = test.inline_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Assets directory does not exist"));

    Ok(())
}
