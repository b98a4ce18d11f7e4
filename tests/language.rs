use std::fs;

use amta::{interpreter::value::core::Value, lex, run_capture};
use walkdir::WalkDir;

const BUDGET: Option<u64> = Some(10_000);

fn run_output(src: &str) -> String {
    match run_capture(src, BUDGET) {
        Ok((_, output)) => output,
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn run_value(src: &str) -> Value {
    match run_capture(src, BUDGET) {
        Ok((value, _)) => value,
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if run_capture(src, BUDGET).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn script_corpus_works() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path()
                                                   .extension()
                                                   .is_some_and(|ext| ext == "amta")
                                              })
    {
        count += 1;
        let path = entry.path();
        let script =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = run_capture(&script, BUDGET) {
            panic!("Script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn force_local_shadows_outer_binding() {
    // S1: the function shadows my_var without touching the outer binding.
    let src = r#"$my_var = "a"
$shadow = fun()
    $!my_var = "b"
    $:print($my_var)
nfu
$shadow()
$:print($my_var)"#;

    assert_eq!(run_output(src), "ba");
}

#[test]
fn parameter_binds_in_the_call_scope() {
    // S2: the parameter binding disappears with the call's scope.
    let src = r#"$greet = fun($a string)
    $:print($a)
nfu
$greet("World!")
$a = "Hello"
$:print($a)"#;

    assert_eq!(run_output(src), "World!Hello");
}

#[test]
fn range_feeds_for_loops() {
    // S3
    let src = "for $x $:range(3)\n$:print($x)\nrfo";
    assert_eq!(run_output(src), "012");
}

#[test]
fn modulo_stays_in_range() {
    // S4
    assert_eq!(run_output("$:print(-1 % 3)"), "2");
    assert_eq!(run_value("return 7 % 3"), Value::Number(1.0));
    assert_eq!(run_value("return -7 % 3"), Value::Number(2.0));
    assert_eq!(run_value("return 0 % 5"), Value::Number(0.0));
}

#[test]
fn hand_built_arrays_iterate() {
    // S5
    let src = r#"$words = {}
$words[0] = "hello, "
$words[1] = "world!"
$words:length = 2
for $word $words
    $:print($word)
rfo"#;

    assert_eq!(run_output(src), "hello, world!");
}

#[test]
fn top_level_return_is_the_exit_value() {
    // S6
    assert_eq!(run_value("return 42").to_string(), "42");
    assert_eq!(run_value("$x = 1").to_string(), "<nil>");
}

#[test]
fn precedence_is_the_documented_oddity() {
    // Additive binds tighter than multiplicative...
    assert_eq!(run_value("return 1 + 2 * 3"), Value::Number(9.0));
    assert_eq!(run_value("return 2 * 3 + 1"), Value::Number(8.0));
    // ...and comparisons bind tighter than additive.
    assert_eq!(run_value("return 1 + 2 < 3"), Value::Number(2.0));
    // Parentheses restore the conventional reading.
    assert_eq!(run_value("return 1 + (2 * 3)"), Value::Number(7.0));
}

#[test]
fn comparisons_and_not_yield_zero_or_one() {
    assert_eq!(run_value("return 2 < 3"), Value::Number(1.0));
    assert_eq!(run_value("return 3 <= 2"), Value::Number(0.0));
    assert_eq!(run_value("return 3 > 2"), Value::Number(1.0));
    assert_eq!(run_value("return 2 >= 3"), Value::Number(0.0));
    assert_eq!(run_value("return 2 == 2"), Value::Number(1.0));
    assert_eq!(run_value("return 2 != 2"), Value::Number(0.0));
    assert_eq!(run_value("return !0"), Value::Number(1.0));
    assert_eq!(run_value("return !\"text\""), Value::Number(0.0));
    assert_eq!(run_value("return !nil"), Value::Number(1.0));
}

#[test]
fn strings_concatenate_and_compare() {
    assert_eq!(run_value("return \"ab\" + \"cd\""), Value::Str("abcd".into()));
    assert_eq!(run_value("return \"n = \" + 4"), Value::Str("n = 4".into()));
    assert_eq!(run_value("return \"abc\" < \"abd\""), Value::Number(1.0));
    assert_eq!(run_value("return \"b\" < \"a\""), Value::Number(0.0));
    assert_eq!(run_value("return +\"42\" + 8"), Value::Number(50.0));
    assert_failure("return +\"not a number\"");
}

#[test]
fn arithmetic_requires_numbers() {
    assert_failure("return \"a\" - 1");
    assert_failure("return {} * 2");
    assert_failure("return nil / 2");
    assert_failure("return \"a\" < 1");
    assert_failure("return -\"a\"");
}

#[test]
fn equality_follows_the_per_kind_rules() {
    assert_eq!(run_value("return nil == nil"), Value::Number(1.0));
    assert_eq!(run_value("return nil == 0"), Value::Number(0.0));
    assert_eq!(run_value("return \"1\" == 1"), Value::Number(0.0));

    let objects = r#"$a = {}
$b = {}
$a:x = 1
$b:x = 1
return $a == $b"#;
    assert_eq!(run_value(objects), Value::Number(1.0));

    let functions = r#"$f = fun($x number)
    return $x
nfu
$g = fun($x number)
    return 0
nfu
return $f == $g"#;
    assert_eq!(run_value(functions), Value::Number(1.0));
}

#[test]
fn assigning_nil_deletes() {
    let src = r#"$o = {}
$o:key = 1
$o:key = nil
$o:length = 0
return $:isarray($o)"#;
    assert_eq!(run_value(src), Value::Number(1.0));

    let shadow = r#"$x = "outer"
$drop = fun()
    $!x = "inner"
    $!x = nil
    $:print($x)
nfu
$drop()"#;
    assert_eq!(run_output(shadow), "outer");
}

#[test]
fn functions_are_dynamically_scoped() {
    // The callee's scope chains from the caller, so it sees the caller's
    // force-local bindings.
    let src = r#"$peek = fun()
    return $hidden
nfu
$wrapper = fun()
    $!hidden = "dynamic"
    return $peek()
nfu
return $wrapper()"#;

    assert_eq!(run_value(src), Value::Str("dynamic".into()));
}

#[test]
fn recursion_and_early_return() {
    let fact = r#"$fact = fun($n number)
    if $n < 1
        return 1
    fi
    return $n * $fact($n - 1)
nfu
return $fact(5)"#;
    assert_eq!(run_value(fact), Value::Number(120.0));

    let find = r#"$find = fun($limit number)
    $i = 0
    while 1
        if $i >= $limit
            return $i
        fi
        $i = $i + 1
    ewhil
nfu
return $find(4)"#;
    assert_eq!(run_value(find), Value::Number(4.0));
}

#[test]
fn call_contract_is_enforced() {
    assert_failure("$:pow(1)");
    assert_failure("$:pow(1, 2, 3)");
    assert_failure("$:pow(\"a\", 2)");
    assert_failure("$:isarray(1)");
    assert_failure("$x = 1\n$x()");

    let arity = r#"$two = fun($a, $b)
    return $a
nfu
$two(1)"#;
    assert_failure(arity);

    let kinds = r#"$wants_string = fun($s string)
    return $s
nfu
$wants_string(1)"#;
    assert_failure(kinds);
}

#[test]
fn if_else_branches() {
    let src = r#"if 1 < 2
    $:print("then")
el
    $:print("else")
fi
if 2 < 1
    $:print("then")
el
    $:print("else")
fi"#;
    assert_eq!(run_output(src), "thenelse");

    let nested = r#"$pick = fun($n number)
    if $n
        if $n < 0
            return "negative"
        fi
        return "positive"
    el
        return "zero"
    fi
nfu
$:print($pick(-3))
$:print($pick(0))
$:print($pick(5))"#;
    assert_eq!(run_output(nested), "negativezeropositive");
}

#[test]
fn while_budget_is_enforced() {
    let counting = r#"$i = 0
while $i < 3
    $i = $i + 1
ewhil
return $i"#;
    assert_eq!(run_value(counting), Value::Number(3.0));

    assert_failure("$i = 0\nwhile $i < 50000\n$i = $i + 1\newhil");

    // An unbounded budget disables the check.
    let unbounded = "$i = 0\nwhile $i < 50000\n$i = $i + 1\newhil\nreturn $i";
    let (value, _) = run_capture(unbounded, None).unwrap();
    assert_eq!(value, Value::Number(50_000.0));
}

#[test]
fn for_requires_the_array_convention() {
    assert_failure("for $x 1\nrfo");
    assert_failure("$o = {}\n$o:x = 1\nfor $v $o\nrfo");
    // Missing a numeric key under length.
    assert_failure("$o = {}\n$o[1] = 1\n$o:length = 2\nfor $v $o\nrfo");
}

#[test]
fn array_convention_is_stable_under_push() {
    // Property 4: appending element n and bumping length keeps an array.
    let src = r#"$a = $:range(2)
$a[2] = 99
$a:length = 3
return $:isarray($a)"#;
    assert_eq!(run_value(src), Value::Number(1.0));
}

#[test]
fn objects_share_by_reference() {
    let src = r#"$grow = fun($bag object)
    $bag:extra = 1
nfu
$o = {}
$grow($o)
return $o:extra"#;
    assert_eq!(run_value(src), Value::Number(1.0));
}

#[test]
fn nested_objects_and_dynamic_indexing() {
    let src = r#"$outer = {}
$outer:inner = {}
$outer:inner:deep = "found"
$key = "deep"
return $outer:inner[$key]"#;
    assert_eq!(run_value(src), Value::Str("found".into()));

    assert_failure("$o = {}\nreturn $o:missing:deeper");
    assert_failure("$o = {}\n$o:missing:deeper = 1");
}

#[test]
fn stdlib_surface_behaves() {
    assert_eq!(run_value("return $:pow(2, 10)"), Value::Number(1024.0));
    assert_eq!(run_value("return $:typeof(1)"), Value::Str("number".into()));
    assert_eq!(run_value("return $:typeof(\"\")"), Value::Str("string".into()));
    assert_eq!(run_value("return $:typeof({})"), Value::Str("object".into()));
    assert_eq!(run_value("return $:typeof(nil)"), Value::Str("nil".into()));
    assert_eq!(run_value("return $:typeof($:print)"), Value::Str("function".into()));

    assert_eq!(run_value("return $:ascii(65)"), Value::Str("A".into()));
    assert_eq!(run_value("return $:ascii(\"A\")"), Value::Number(65.0));
    assert_eq!(run_value("return $:ascii(256)"), Value::Nil);
    assert_eq!(run_value("return $:ascii(-1)"), Value::Nil);
    assert_eq!(run_value("return $:ascii(\"ab\")"), Value::Nil);

    assert_eq!(run_value("return $:isarray($:range(0))"), Value::Number(1.0));
    assert_eq!(run_value("$r = $:range(4)\nreturn $r:length"), Value::Number(4.0));
    assert_eq!(run_value("$r = $:range(2, 5)\nreturn $r[0]"), Value::Number(2.0));
    assert_eq!(run_value("$r = $:range(2, 5)\nreturn $r[2]"), Value::Number(4.0));
    assert_eq!(run_value("$r = $:range(10, 0, -3)\nreturn $r[1]"), Value::Number(7.0));
    assert_failure("$:range(0, 1, 0)");
}

#[test]
fn comments_and_continuations_are_cleaned() {
    let src = "# leading banner\n$x = 1 + \\\n      2\n$:print($x)  # trailing\n";
    assert_eq!(run_output(src), "3");

    // A '#' inside a string survives when a quote follows it.
    assert_eq!(run_output("$:print(\"a#b\")"), "a#b");
}

#[test]
fn string_escapes_decode() {
    assert_eq!(run_output(r#"$:print("a\nb")"#), "a\nb");
    assert_eq!(run_output(r#"$:print("say \"hi\"")"#), "say \"hi\"");
    assert_eq!(run_output(r#"$:print("back\\slash")"#), "back\\slash");
    assert_eq!(run_output(r#"$:print("\x41\x42")"#), "AB");

    assert_failure(r#"$x = "\q""#);
    assert_failure(r#"$x = "\x4""#);
    assert_failure("$x = \"unterminated");
}

#[test]
fn lex_rejects_unknown_input() {
    assert_failure("foo");
    assert_failure("$x = 1 ; 2");
    assert_failure("$x = {");
    assert_failure("if true\nfi");
}

#[test]
fn parse_rejects_malformed_programs() {
    assert_failure("if 1\n$x = 1");
    assert_failure("while 1\n$x = 1");
    assert_failure("for $x $:range(1)\n$x = 1");
    assert_failure("$f = fun()\nreturn 1");
    assert_failure("$x =");
    assert_failure("$x");
    assert_failure("$x = (1 + 2");
    assert_failure("$o[0 = 1");
    assert_failure("continue");
    assert_failure("return 1 +");
}

#[test]
fn nil_and_bare_return() {
    assert_eq!(run_value("return"), Value::Nil);
    assert_eq!(run_value("return nil"), Value::Nil);
    assert_eq!(run_output("$:print(nil)"), "<nil>");
    assert_eq!(run_value("return $undefined"), Value::Nil);
}

#[test]
fn object_dump_is_deterministic() {
    let src = r#"$o = {}
$o:b = 1
$o:a = 2
$o[10] = 3
$o[2] = 4
$:print($o)"#;

    let first = run_output(src);
    let second = run_output(src);

    assert_eq!(first, second);
    assert_eq!(first, "{\n  2: 4\n  10: 3\n  a: 2\n  b: 1\n}");
}

#[test]
fn function_values_stringify() {
    let src = r#"$f = fun($a, $b number)
    return $a
nfu
$:print($f)"#;
    assert_eq!(run_output(src), "fun(a, b)");
}

#[test]
fn tokens_round_trip_through_their_stringification() {
    // Property 1: re-tokenizing a token's stringification preserves its
    // classification.
    let src = r#"$o = {}
$o:k[0] = "text \"quoted\" \x7f"
while $!i <= .5
    $i = $i + 2.25 % 3 * 4 - 1
ewhil
if !($x != nil) >= 1
    $f = fun($a string, $b number)
        return $a
    nfu
fi
for $v $:range(3)
rfo
continue"#;

    let tokens = lex(src).expect("sample program lexes");
    assert!(!tokens.is_empty());

    for (token, _) in &tokens {
        if matches!(token, amta::interpreter::lexer::Token::NewLine) {
            continue;
        }

        let rendered = token.to_string();
        let relexed = lex(&rendered).unwrap_or_else(|e| panic!("{rendered:?} failed to re-lex: {e}"));

        assert_eq!(relexed.len(), 1, "{rendered:?} split into {relexed:?}");
        assert_eq!(&relexed[0].0, token, "{rendered:?} changed classification");
    }
}

#[test]
fn evaluation_is_deterministic() {
    let src = r#"$sum = 0
for $i $:range(10)
    $sum = $sum + $i * 2
rfo
$:print($sum)
return $sum"#;

    let (first_value, first_output) = run_capture(src, BUDGET).unwrap();
    let (second_value, second_output) = run_capture(src, BUDGET).unwrap();

    assert_eq!(first_value, second_value);
    assert_eq!(first_output, second_output);
}
