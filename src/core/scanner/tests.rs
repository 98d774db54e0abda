use pretty_assertions::assert_eq;

use super::*;

fn keys(calls: &[MarkerCall]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| c.key_arg().and_then(Argument::as_str))
        .collect()
}

#[test]
fn test_scan_simple_calls() {
    let code = r#"
import { $translate } from 'qwik-speak';
export const Home = () => <h1>{$translate('home.title')}</h1>;
const b = $translate("home.body", { name: 'x' });
"#;
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["home.title", "home.body"]);
    assert_eq!(calls[0].raw, "$translate('home.title')");
    assert_eq!(&code[calls[1].span.clone()], calls[1].raw);
}

#[test]
fn test_scan_renamed_alias() {
    let code = r#"
import { $translate as t } from 'qwik-speak';
const a = t('a.b');
const b = at('not.this');
const c = obj.t('nor.this');
"#;
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["a.b"]);
}

#[test]
fn test_skips_strings_and_comments() {
    let code = r#"
const s = "$translate('in.string')";
// $translate('in.comment')
/* $translate('in.block') */
const tpl = `$translate('in.template')`;
const real = $translate('real.key');
"#;
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["real.key"]);
}

#[test]
fn test_finds_calls_in_template_expressions() {
    let code = "const s = `Title: ${$translate('home.title')} and ${ { a: 1 }.a }`;";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["home.title"]);
}

#[test]
fn test_nested_parentheses_in_arguments() {
    let code = "$translate('a', { n: format(1, (2)), s: ')' }) + $translate('b')";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["a", "b"]);
    assert_eq!(calls[0].raw, "$translate('a', { n: format(1, (2)), s: ')' })");
    assert!(matches!(calls[0].params_arg(), Some(Argument::Object(_))));
}

#[test]
fn test_strips_generic_type_arguments() {
    let code = "const arr = t<string[]>('nested.array');\nconst o = t<Record<string, Translation>>('nested');";
    let calls = scan_alias(code, MarkerFamily::Translate, "t");
    assert_eq!(keys(&calls), vec!["nested.array", "nested"]);
    assert_eq!(calls[0].raw, "t<string[]>('nested.array')");
}

#[test]
fn test_comparison_is_not_generic() {
    let code = "if (t < 5 && x > (1)) {}";
    let calls = scan_alias(code, MarkerFamily::Translate, "t");
    assert!(calls.is_empty());
}

#[test]
fn test_unbalanced_call_is_absent() {
    let code = "$translate('a', { b: 1 ); $translate('c');";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    // The first call cannot be balanced and contributes nothing.
    assert_eq!(keys(&calls), vec!["c"]);
}

#[test]
fn test_function_declaration_is_not_a_call() {
    let code = "export function $translate(key, params) { return key; }\n$translate('x');";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["x"]);
}

#[test]
fn test_array_of_keys() {
    let code = "$translate(['a', 'b@@Default'])";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(
        calls[0].arguments[0],
        Argument::Array(vec![Argument::string("a"), Argument::string("b@@Default")])
    );
}

#[test]
fn test_plural_arguments() {
    let code = "$plural(count.value, 'home.devs', { role: 'dev' }, { type: 'ordinal' }, 'it-IT')";
    let calls = scan_calls(code, MarkerFamily::Plural, "$plural");
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.arg(0), Some(&Argument::Identifier("count.value".to_string())));
    assert_eq!(call.key_arg().and_then(Argument::as_str), Some("home.devs"));
    assert!(call.params_arg().and_then(Argument::properties).is_some());
    assert!(call.options_arg().and_then(Argument::properties).is_some());
    assert_eq!(call.lang_arg().and_then(Argument::as_str), Some("it-IT"));
}

#[test]
fn test_hook_family() {
    let code = r#"
const t = useTranslate$();
const title = await t('app.title');
"#;
    let calls = scan_calls(code, MarkerFamily::UseTranslate, "useTranslate$");
    assert_eq!(keys(&calls), vec!["app.title"]);
}

#[test]
fn test_marker_absent_short_circuits() {
    let code = "t('a')";
    assert!(scan_calls(code, MarkerFamily::Translate, "$translate").is_empty());
}

#[test]
fn test_nested_marker_calls_are_both_found() {
    let code = "$translate('outer', { inner: $translate('inner') })";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["outer", "inner"]);
    assert!(!calls[0].params_arg().is_some_and(Argument::is_dynamic));
    assert!(calls[0].span.contains(&calls[1].span.start));
}

#[test]
fn test_display_collapses_whitespace() {
    let code = "$translate(\n  key,\n  { a: 1 }\n)";
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(calls[0].display(), "$translate( key, { a: 1 } )");
}

#[test]
fn test_apostrophe_in_jsx_text() {
    let code = r#"import { $translate as t } from 'qwik-speak';
export const Page = () => <p>Don't miss</p><h1>{t('home.title')}</h1>;
"#;
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["home.title"]);
}

#[test]
fn test_jsx_text_is_not_code() {
    let code = r#"import { $translate as t } from 'qwik-speak';
export default () => (
  <section title="it's here">
    <p>'Tis the {t('season')}, write t('like.this') to translate</p>
    <input placeholder={t('form.name')} />
    {list.map((item) => <li key={item}>{t('list.item')}</li>)}
  </section>
);
const after = t('after.jsx');
"#;
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(
        keys(&calls),
        vec!["season", "form.name", "list.item", "after.jsx"]
    );
}

#[test]
fn test_minified_keyword_before_string() {
    let code = r#"function f(a){switch(a){case"x'y":return $translate('a');default:return"it's"}}$translate('b')"#;
    let calls = scan_calls(code, MarkerFamily::Translate, "$translate");
    assert_eq!(keys(&calls), vec!["a", "b"]);
}

#[test]
fn test_generics_are_not_jsx() {
    let code = "const id = <T,>(x: T) => x;\nconst f = <T>(x: T): T => x;\nconst a = t('after');";
    let calls = scan_alias(code, MarkerFamily::Translate, "t");
    assert_eq!(keys(&calls), vec!["after"]);
}
