use std::sync::Arc;

use ipopt_deprecation::prelude::*;
use ipopt_deprecation::{generate_deprecation_warning_msg, Category};

const PROBLEM_FUNCTION_MSG: &str = "The function named 'problem' will soon be deprecated in CyIpopt. Please replace all uses and use 'Problem' going forward.";

#[derive(Debug, PartialEq)]
struct Problem {
    n: usize,
    m: usize,
}

/// Keyword style arguments for constructing a [`Problem`]
struct Dimensions {
    x: usize,
    y: usize,
}

impl From<Dimensions> for Problem {
    fn from(args: Dimensions) -> Self {
        Self {
            n: args.x,
            m: args.y,
        }
    }
}

impl From<(usize, usize)> for Problem {
    fn from((n, m): (usize, usize)) -> Self {
        Self { n, m }
    }
}

#[derive(Debug, PartialEq)]
struct Bounded(f64);

impl TryFrom<f64> for Bounded {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(format!("bound {value} is not finite"))
        }
    }
}

fn capture() -> (Arc<CapturingSink>, Arc<dyn WarningSink>) {
    let sink = Arc::new(CapturingSink::new());
    let handle: Arc<dyn WarningSink> = sink.clone();
    (sink, handle)
}

fn f((a, b): (i32, Option<i32>)) -> i32 {
    a * 10 + b.unwrap_or(2)
}

struct Options {
    max_iter: usize,
}

impl Options {
    fn add_option(&self) -> usize {
        self.max_iter
    }
}

struct Wrapper<T>(T);

impl<T: Copy> Wrapper<T> {
    fn get(&self) -> T {
        self.0
    }
}

trait Solve {
    fn solve(&self) -> f64;
}

struct Solver;

impl Solve for Solver {
    fn solve(&self) -> f64 {
        1.5
    }
}

fn method_msg(old: &str, class: &str, new: &str) -> String {
    format!(
        "The method named '{old}' in class '{class}' will soon be deprecated in CyIpopt. \
         Please replace all uses and use '{new}' going forward."
    )
}

#[test]
fn message_matches_the_documented_example() {
    let msg = generate_deprecation_warning_msg(Kind::Function, "problem", "Problem", None).unwrap();
    assert_eq!(msg, PROBLEM_FUNCTION_MSG);
}

#[test]
fn message_without_class_name_never_mentions_a_class() {
    for what in [Kind::Function, Kind::Method] {
        for (old, new) in [("problem", "Problem"), ("addOption", "add_option"), ("", "")] {
            let msg = generate_deprecation_warning_msg(what, old, new, None).unwrap();
            assert!(!msg.contains("in class"), "{msg}");
            assert!(msg.starts_with(&format!("The {what} named '{old}' will soon")));
        }
    }
}

#[test]
fn method_message_names_the_owning_class() {
    for class_name in ["Problem", "", "with space"] {
        let msg = generate_deprecation_warning_msg(
            Kind::Method,
            "addOption",
            "add_option",
            Some(class_name),
        )
        .unwrap();
        let clause = format!("in class '{class_name}' ");
        assert_eq!(msg.matches(&clause).count(), 1);
        assert_eq!(
            msg,
            format!(
                "The method named 'addOption' {clause}will soon be deprecated in CyIpopt. \
                 Please replace all uses and use 'add_option' going forward."
            )
        );
    }
}

#[test]
fn class_with_class_name_is_always_rejected() {
    for class_name in ["Problem", "", "problem"] {
        assert_eq!(
            generate_deprecation_warning_msg(Kind::Class, "problem", "Problem", Some(class_name)),
            Err(DeprecationError::IncorrectArguments)
        );
    }
    assert_eq!(
        DeprecationError::IncorrectArguments.to_string(),
        "Incorrect use of function arguments."
    );
}

#[test]
fn decorated_function_returns_the_same_value_and_warns_once() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("g")
        .with_sink(handle)
        .decorate(f)
        .unwrap();

    assert_eq!(deprecated.call((5, None)).unwrap(), f((5, None)));
    assert_eq!(sink.len(), 1);

    let warning = &sink.warnings()[0];
    assert_eq!(warning.category, Category::Future);
    assert_eq!(
        warning.message,
        "The function named 'f' will soon be deprecated in CyIpopt. \
         Please replace all uses and use 'g' going forward."
    );
}

#[test]
fn each_call_warns_with_identical_text() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("Problem")
        .with_sink(handle)
        .decorate_as("problem", |x: u32| x + 1);

    assert_eq!(deprecated.call(1).unwrap(), 2);
    assert_eq!(deprecated.call(2).unwrap(), 3);

    let messages = sink.messages();
    assert_eq!(messages, vec![PROBLEM_FUNCTION_MSG, PROBLEM_FUNCTION_MSG]);
}

#[test]
fn method_decorator_names_the_class() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("add_option")
        .method_of("Problem")
        .with_sink(handle)
        .decorate_as("addOption", |(key, value): (&str, i32)| format!("{key}={value}"));

    assert_eq!(deprecated.call(("max_iter", 100)).unwrap(), "max_iter=100");
    assert_eq!(
        sink.messages(),
        vec!["The method named 'addOption' in class 'Problem' will soon be deprecated in \
              CyIpopt. Please replace all uses and use 'add_option' going forward."]
    );
}

#[test]
fn decorated_inherent_method_takes_its_own_name() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("set_option")
        .method_of("Options")
        .with_sink(handle)
        .decorate(Options::add_option)
        .unwrap();

    assert_eq!(deprecated.old_name(), "add_option");
    assert_eq!(deprecated.call(&Options { max_iter: 3000 }).unwrap(), 3000);
    assert_eq!(
        sink.messages(),
        vec![method_msg("add_option", "Options", "set_option")]
    );
}

#[test]
fn decorated_generic_impl_method_takes_its_own_name() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("value")
        .method_of("Wrapper")
        .with_sink(handle)
        .decorate(Wrapper::<u8>::get)
        .unwrap();

    assert_eq!(deprecated.old_name(), "get");
    assert_eq!(deprecated.call(&Wrapper(7u8)).unwrap(), 7);
    assert_eq!(sink.messages(), vec![method_msg("get", "Wrapper", "value")]);
}

#[test]
fn decorated_trait_method_takes_its_own_name() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("minimize")
        .method_of("Solver")
        .with_sink(handle)
        .decorate(<Solver as Solve>::solve)
        .unwrap();

    assert_eq!(deprecated.old_name(), "solve");
    assert_eq!(deprecated.call(&Solver).unwrap(), 1.5);
    assert_eq!(sink.messages(), vec![method_msg("solve", "Solver", "minimize")]);
}

#[test]
fn closures_must_be_named_explicitly() {
    let (sink, handle) = capture();
    let result = deprecated_warning("Problem")
        .with_sink(handle)
        .decorate(|x: u32| x);

    assert!(matches!(
        result.err(),
        Some(DeprecationError::UnnamedCallable(name)) if name.ends_with("{{closure}}")
    ));
    assert!(sink.is_empty());
}

#[test]
fn errors_from_the_wrapped_callable_pass_through_unchanged() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("solve")
        .with_sink(handle)
        .decorate_as("solveProblem", |x: i32| -> Result<i32, String> {
            if x < 0 {
                Err("negative".to_owned())
            } else {
                Ok(x)
            }
        });

    assert_eq!(deprecated.call(-1).unwrap(), Err("negative".to_owned()));
    assert_eq!(deprecated.call(3).unwrap(), Ok(3));
    assert_eq!(sink.len(), 2);
}

#[test]
fn mutable_callables_keep_their_state() {
    let (sink, handle) = capture();
    let mut calls = 0;
    let mut deprecated = deprecated_warning("count")
        .with_sink(handle)
        .decorate_as("tally", |step: i32| {
            calls += step;
            calls
        });

    assert_eq!(deprecated.call_mut(2).unwrap(), 2);
    assert_eq!(deprecated.call_mut(3).unwrap(), 5);
    drop(deprecated);
    assert_eq!(calls, 5);
    assert_eq!(sink.len(), 2);
}

#[test]
fn library_name_is_configurable() {
    let (sink, handle) = capture();
    let deprecated = deprecated_warning("Problem")
        .library("ipopt-rs")
        .with_sink(handle)
        .decorate_as("problem", |(): ()| ());

    deprecated.call(()).unwrap();
    assert!(sink.messages()[0].contains("deprecated in ipopt-rs."));
}

#[test]
fn substitute_constructs_the_replacement() {
    let (sink, handle) = capture();
    let class = DeprecatedClass::<Problem>::problem().with_sink(handle);

    let via_substitute = class.construct(Dimensions { x: 1, y: 2 }).unwrap();
    let direct = Problem::from(Dimensions { x: 1, y: 2 });

    assert_eq!(via_substitute, direct);
    assert_eq!(
        sink.warnings(),
        vec![Warning::future(
            "The class named 'problem' will soon be deprecated in CyIpopt. \
             Please replace all uses and use 'Problem' going forward."
        )]
    );
}

#[test]
fn substitute_forwards_any_argument_shape() {
    let (sink, handle) = capture();
    let class = DeprecatedClass::<Problem>::problem().with_sink(handle);

    assert_eq!(class.construct((3, 4)).unwrap(), Problem { n: 3, m: 4 });
    assert_eq!(class.construct((5, 6)).unwrap(), Problem { n: 5, m: 6 });
    assert_eq!(sink.len(), 2);
}

#[test]
fn fallible_replacement_errors_are_returned_untouched() {
    let (sink, handle) = capture();
    let class = DeprecatedClass::<Bounded>::new("bounded", "Bounded").with_sink(handle);

    assert_eq!(class.try_construct(1.5).unwrap(), Ok(Bounded(1.5)));
    assert_eq!(
        class.try_construct(f64::INFINITY).unwrap(),
        Err("bound inf is not finite".to_owned())
    );
    assert_eq!(sink.len(), 2);
}

#[test]
fn problem_shorthand_uses_the_default_sink() {
    let built: Problem = problem(Dimensions { x: 7, y: 8 }).unwrap();
    assert_eq!(built, Problem { n: 7, m: 8 });
}

#[test]
fn owned_class_substitute_cannot_be_described() {
    let class = DeprecatedClass::<Problem>::problem();
    let mut deprecation = class.deprecation().clone();
    deprecation.class_name = Some("Solver".into());
    assert_eq!(
        deprecation.message(),
        Err(DeprecationError::IncorrectArguments)
    );
}
