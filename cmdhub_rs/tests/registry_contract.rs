//! Contract tests for the dispatch core, driven through captured consoles.

use std::sync::{Arc, Mutex};

use cmdhub::{
    ApproximateMatcher, CommandCatalog, CommandDescriptor, CommandRegistry, Console, Executor,
    OptionsParser, OptionsPipeline, ParseError, StandardOptions,
};
use serde::Serialize;

struct Captured {
    code: i32,
    out: String,
    err: String,
}

fn exec(registry: &CommandRegistry, argv: &[&str]) -> Captured {
    let args: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = {
        let mut console = Console::new(&mut out, &mut err);
        registry.exec(&args, &mut console)
    };
    Captured {
        code,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

/// Handler that records the arguments it received and returns `code`.
fn recording(code: i32, seen: Arc<Mutex<Vec<Vec<String>>>>) -> CommandDescriptor {
    CommandDescriptor::new(
        format!("cmd{code}"),
        move |args: &[String], _: &mut Console<'_>| {
            seen.lock().unwrap().push(args.to_vec());
            code
        },
    )
}

fn sample_registry() -> CommandRegistry {
    let noop = |_: &[String], _: &mut Console<'_>| 0;
    CommandRegistry::new(
        "jdx",
        CommandCatalog::new(vec![
            CommandDescriptor::new("ts2chart", noop)
                .with_category("io")
                .with_description("Render a chart"),
            CommandDescriptor::new("ts2stats", noop)
                .with_category("io")
                .with_description("Describe a series"),
            CommandDescriptor::new("sa-report", noop)
                .with_category("sa")
                .with_description("Seasonal adjustment report"),
            CommandDescriptor::new("properties", noop),
        ]),
    )
}

mod dispatch {
    use super::*;

    #[test]
    fn usage_lists_every_command_exactly_once() {
        let registry = sample_registry();
        let result = exec(&registry, &[]);
        assert_eq!(result.code, 0);
        assert!(result.out.contains("usage: jdx <command> [<args>]"));
        for cmd in registry.catalog().iter() {
            let hits = result
                .out
                .lines()
                .filter(|line| {
                    line.strip_prefix("   ")
                        .and_then(|row| row.split(' ').next())
                        == Some(cmd.name())
                })
                .count();
            assert_eq!(hits, 1, "{} listed once", cmd.name());
        }
    }

    #[test]
    fn hits_delegate_rest_and_exit_code_unchanged() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = CommandRegistry::new(
            "jdx",
            CommandCatalog::new(vec![
                recording(0, Arc::clone(&seen)),
                recording(7, Arc::clone(&seen)),
                recording(-3, Arc::clone(&seen)),
            ]),
        );

        assert_eq!(exec(&registry, &["cmd7", "-x", "file.xml"]).code, 7);
        assert_eq!(exec(&registry, &["cmd-3"]).code, -3);
        assert_eq!(exec(&registry, &["cmd0", "cmd7"]).code, 0);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                vec!["-x".to_string(), "file.xml".to_string()],
                vec![],
                vec!["cmd7".to_string()],
            ]
        );
    }

    #[test]
    fn far_miss_prints_full_listing() {
        let registry = sample_registry();
        let result = exec(&registry, &["qqqqqq"]);
        assert_eq!(result.code, 0);
        assert!(result.err.contains("jdx: 'qqqqqq' is not a valid command."));
        assert!(!result.err.contains("Did you mean"));
        assert_eq!(result.out, format!("\n{}", registry.format_listing()));
    }

    #[test]
    fn near_miss_prints_only_close_candidates_sorted() {
        let result = exec(&sample_registry(), &["ts2stat"]);
        assert_eq!(result.code, 0);
        assert!(result.out.is_empty());
        assert!(result.err.contains("Did you mean one of these?"));
        assert!(result.err.contains("   ts2stats Describe a series\n"));
        assert!(!result.err.contains("ts2chart"));

        let result = exec(&sample_registry(), &["ts2"]);
        let chart = result.err.find("ts2chart").expect("ts2chart suggested");
        let stats = result.err.find("ts2stats").expect("ts2stats suggested");
        assert!(chart < stats);
        assert!(!result.err.contains("properties"));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let registry = sample_registry();
        for argv in [&[][..], &["ts2chrt"][..], &["zzzzz"][..], &["properties"][..]] {
            let first = exec(&registry, argv);
            let second = exec(&registry, argv);
            assert_eq!(first.code, second.code);
            assert_eq!(first.out, second.out);
            assert_eq!(first.err, second.err);
        }
    }

    #[test]
    fn empty_catalog_still_prints_usage() {
        let registry = CommandRegistry::new("bare", CommandCatalog::default());
        let result = exec(&registry, &[]);
        assert_eq!(result.code, 0);
        assert_eq!(result.out, "usage: bare <command> [<args>]\n\n");

        let result = exec(&registry, &["anything"]);
        assert_eq!(result.code, 0);
        assert_eq!(result.err, "bare: 'anything' is not a valid command.\n");
    }

    #[test]
    fn registry_can_be_shared_across_threads() {
        let registry = Arc::new(sample_registry());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || exec(&registry, &["ts2chrt"]).err)
            })
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}

mod matching {
    use super::*;

    #[test]
    fn boundary_cases_from_the_command_line() {
        let m = ApproximateMatcher::new("mycommand", 1).unwrap();
        for candidate in ["mycommand", "mycommant", "mycomand", "ymcommand"] {
            assert!(m.matches(candidate), "{candidate}");
        }
        assert!(!m.matches("hello"));
    }

    #[test]
    fn round_trip_for_any_budget() {
        for pattern in ["x", "sa-report", "ts2chart", "properties"] {
            for k in [0, 1, 2, 5] {
                assert!(ApproximateMatcher::new(pattern, k).unwrap().matches(pattern));
            }
        }
    }
}

mod pipeline {
    use super::*;

    #[derive(Debug, Default, Serialize)]
    struct Opts {
        standard: StandardOptions,
        payload: Option<String>,
    }

    /// Parser that fails on any argument it does not know.
    struct StrictParser;

    impl OptionsParser for StrictParser {
        type Options = Opts;

        fn parse(&mut self, args: &[String]) -> Result<Opts, ParseError> {
            let mut opts = Opts::default();
            let mut iter = args.iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "-h" => opts.standard.help = true,
                    "-V" => opts.standard.version = true,
                    "-v" => opts.standard.verbose = true,
                    "-p" => {
                        let value = iter
                            .next()
                            .ok_or_else(|| ParseError::invalid("-p requires a value"))?;
                        opts.payload = Some(value.clone());
                    }
                    other => {
                        return Err(ParseError::invalid(format!("unexpected argument '{other}'")));
                    }
                }
            }
            Ok(opts)
        }

        fn help(&self) -> String {
            "strict [-p VALUE]".to_string()
        }
    }

    struct Recorder(Arc<Mutex<Vec<Option<String>>>>);

    impl Executor for Recorder {
        type Options = Opts;

        fn exec(&mut self, options: &Opts, console: &mut Console<'_>) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(options.payload.clone());
            console.out_line("done");
            Ok(())
        }
    }

    fn registry(calls: Arc<Mutex<Vec<Option<String>>>>) -> CommandRegistry {
        let pipeline = OptionsPipeline::new(
            || StrictParser,
            move || Recorder(Arc::clone(&calls)),
            |opts: &Opts| opts.standard,
        );
        CommandRegistry::new(
            "jdx",
            CommandCatalog::new(vec![CommandDescriptor::new("strict", pipeline)]),
        )
    }

    #[test]
    fn parse_failure_exits_minus_one_with_single_message() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let result = exec(&registry(Arc::clone(&calls)), &["strict", "--nope"]);
        assert_eq!(result.code, -1);
        assert_eq!(result.err, "unexpected argument '--nope'\n");
        assert!(result.out.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn help_short_circuits_through_the_registry() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let result = exec(&registry(Arc::clone(&calls)), &["strict", "-v", "-V", "-h"]);
        assert_eq!(result.code, 0);
        assert_eq!(result.out, "strict [-p VALUE]\n");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn each_invocation_gets_fresh_instances() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let registry = registry(Arc::clone(&calls));
        assert_eq!(exec(&registry, &["strict", "-p", "a"]).code, 0);
        assert_eq!(exec(&registry, &["strict"]).code, 0);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![Some("a".to_string()), None]
        );
    }

    #[test]
    fn verbose_success_reports_timing() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let result = exec(&registry(calls), &["strict", "-v", "-p", "x"]);
        assert_eq!(result.code, 0);
        assert_eq!(result.out, "done\n");
        assert!(result.err.contains("\"payload\": \"x\""));
        let timing = result
            .err
            .lines()
            .find(|line| line.starts_with("Executed in "))
            .expect("timing line");
        let millis: u128 = timing
            .trim_start_matches("Executed in ")
            .trim_end_matches(" ms")
            .parse()
            .expect("millisecond count");
        assert!(millis < 60_000);
    }
}
