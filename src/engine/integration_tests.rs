use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{load_and_validate_config, EngineOptions, RuntimeBuilder};
use crate::dispatch::RecordingDispatcher;
use crate::engine::{Engine, GeneratorRegistry, RunContext, RunReport, RunState};
use crate::errors::{ProgramError, RegistryError, TaskError};
use crate::graph::{NodeId, NodeSpec, Program, ProgramNode};
use crate::runtime::{Runtime, VariableStore};
use crate::traits::{ProgramExecutor, Task, TaskOutput};
use crate::types::{Command, Value};

/// End-to-end runs of snapshotted programs against the built-in blocks
#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> NodeSpec {
        NodeSpec::new("math_number").field("NUM", n)
    }

    fn text(s: &str) -> NodeSpec {
        NodeSpec::new("text_literal").field("TEXT", s)
    }

    fn boolean(b: bool) -> NodeSpec {
        NodeSpec::new("logic_boolean").field("BOOL", if b { "TRUE" } else { "FALSE" })
    }

    fn log(message: NodeSpec) -> NodeSpec {
        NodeSpec::new("log_block").value("TEXT", message)
    }

    fn log_text(s: &str) -> NodeSpec {
        log(text(s))
    }

    fn chain(nodes: Vec<NodeSpec>) -> NodeSpec {
        NodeSpec::chain(nodes).unwrap()
    }

    fn runtime(dispatcher: &Arc<RecordingDispatcher>) -> Runtime {
        Runtime::new(dispatcher.clone())
    }

    async fn run(runtime: Runtime, roots: Vec<NodeSpec>) -> RunReport {
        let program = Program::snapshot(&roots).unwrap();
        Engine::new(runtime).run(&program).await
    }

    /// `value` of every `log` command, in order
    fn logged(dispatcher: &RecordingDispatcher) -> Vec<String> {
        dispatcher
            .commands()
            .iter()
            .filter(|c| c.name() == "log")
            .filter_map(|c| c.value().and_then(|v| v.as_str()).map(str::to_string))
            .collect()
    }

    struct Explode;

    #[async_trait]
    impl Task for Explode {
        async fn run(&self, _ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
            Err(TaskError::Failed("bridge offline".to_string()))
        }

        fn name(&self) -> &str {
            "explode"
        }
    }

    /// Hands back `layers` nested deferred tasks before settling on a value
    struct Onion {
        layers: usize,
    }

    #[async_trait]
    impl Task for Onion {
        async fn run(&self, _ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
            if self.layers == 0 {
                Ok(TaskOutput::value("core"))
            } else {
                Ok(TaskOutput::Deferred(Arc::new(Onion {
                    layers: self.layers - 1,
                })))
            }
        }

        fn name(&self) -> &str {
            "onion"
        }
    }

    /// Never settles
    struct Forever;

    #[async_trait]
    impl Task for Forever {
        async fn run(&self, _ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
            Ok(TaskOutput::Deferred(Arc::new(Forever)))
        }

        fn name(&self) -> &str {
            "forever"
        }
    }

    /// Dispatches `witness` whenever it is evaluated, then yields `true`
    struct Witness;

    #[async_trait]
    impl Task for Witness {
        async fn run(&self, ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
            ctx.dispatch(Command::new("witness")).await?;
            Ok(TaskOutput::value(true))
        }

        fn name(&self) -> &str {
            "witness"
        }
    }

    /// Logs `TEXT` read as a string, upper-cased when `LOUD` holds
    struct Announce {
        node: NodeId,
    }

    #[async_trait]
    impl Task for Announce {
        async fn run(&self, ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
            let text = ctx.evaluate_as::<String>(self.node, "TEXT", "silent".to_string()).await;
            let loud = ctx.evaluate_as::<bool>(self.node, "LOUD", false).await;
            let text = if loud { text.to_uppercase() } else { text };
            ctx.dispatch(Command::new("log").with_value(text)).await?;
            Ok(TaskOutput::Unit)
        }

        fn name(&self) -> &str {
            "announce"
        }
    }

    fn custom_registry() -> GeneratorRegistry {
        let mut registry = GeneratorRegistry::with_builtins();
        registry.register("explode", |_: &ProgramNode| Arc::new(Explode) as Arc<dyn Task>);
        registry.register("witness", |_: &ProgramNode| Arc::new(Witness) as Arc<dyn Task>);
        registry.register("announce", |node: &ProgramNode| {
            Arc::new(Announce { node: node.index() }) as Arc<dyn Task>
        });
        registry.register("forever", |_: &ProgramNode| Arc::new(Forever) as Arc<dyn Task>);
        registry.register("onion", |node: &ProgramNode| {
            let layers = node.field("LAYERS").and_then(Value::as_number).unwrap_or(0.0) as usize;
            Arc::new(Onion { layers }) as Arc<dyn Task>
        });
        registry
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_delay_led_disconnect_scenario() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("connect"),
            NodeSpec::new("delay").field("DELAY", 500),
            NodeSpec::new("set_led").field("STATE", "ON"),
            NodeSpec::new("disconnect"),
        ]);

        let report = run(runtime(&dispatcher), vec![root]).await;

        assert_eq!(dispatcher.names(), vec!["connect", "delay", "led_on", "disconnect"]);
        let records = dispatcher.records();
        assert_eq!(records[1].command.value(), Some(&serde_json::json!(500)));
        assert!(records[2].at - records[1].at >= Duration::from_millis(500));

        assert_eq!(report.state, RunState::Completed);
        assert_eq!(report.commands_dispatched, 4);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_repeat_runs_body_exact_times() {
        struct TestCase {
            name: &'static str,
            times: Option<NodeSpec>,
            expected: usize,
        }

        let cases = vec![
            TestCase { name: "three", times: Some(num(3)), expected: 3 },
            TestCase { name: "two", times: Some(num(2)), expected: 2 },
            TestCase { name: "zero", times: Some(num(0)), expected: 0 },
            TestCase { name: "negative", times: Some(num(-4)), expected: 0 },
            TestCase { name: "numeric text", times: Some(text("2")), expected: 2 },
            TestCase { name: "non-numeric", times: Some(text("lots")), expected: 1 },
            TestCase { name: "missing", times: None, expected: 1 },
            TestCase { name: "infinite text", times: Some(text("inf")), expected: 1 },
            TestCase { name: "negative zero", times: Some(num(-0)), expected: 0 },
            TestCase {
                name: "negative zero float",
                times: Some(NodeSpec::new("math_number").field("NUM", -0.0)),
                expected: 0,
            },
        ];

        for case in cases {
            let dispatcher = Arc::new(RecordingDispatcher::new());
            let mut repeat = NodeSpec::new("repeat_loop").statement("DO", log_text("x"));
            if let Some(times) = case.times {
                repeat = repeat.value("TIMES", times);
            }

            run(runtime(&dispatcher), vec![repeat]).await;
            assert_eq!(logged(&dispatcher).len(), case.expected, "case '{}'", case.name);
        }
    }

    #[tokio::test]
    async fn test_huge_repeat_count_can_be_cancelled() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let repeat = NodeSpec::new("repeat_loop")
            .value("TIMES", NodeSpec::new("math_number").field("NUM", 1e300))
            .statement("DO", NodeSpec::new("comment_block"));

        let outcome = tokio::time::timeout(
            Duration::from_millis(100),
            run(runtime(&dispatcher), vec![repeat]),
        )
        .await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_while_always_true_stops_at_cap() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let looped = NodeSpec::new("while_loop")
            .field("COND", "TRUE")
            .statement("DO", log_text("tick"));

        let report = run(runtime(&dispatcher), vec![looped]).await;

        assert_eq!(logged(&dispatcher).len(), 1000);
        assert_eq!(report.loop_caps_hit, 1);
        assert_eq!(report.tasks_failed, 0);
    }

    #[tokio::test]
    async fn test_while_cap_is_configurable() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let options = EngineOptions {
            while_loop_cap: 7,
            ..EngineOptions::default()
        };
        let looped = NodeSpec::new("while_loop")
            .value("COND", boolean(true))
            .statement("DO", log_text("tick"));

        run(runtime(&dispatcher).with_options(options), vec![looped]).await;
        assert_eq!(logged(&dispatcher).len(), 7);
    }

    #[tokio::test]
    async fn test_while_condition_checked_once_more_than_cap() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let options = EngineOptions {
            while_loop_cap: 3,
            ..EngineOptions::default()
        };
        let looped = NodeSpec::new("while_loop")
            .value("COND", NodeSpec::new("witness"))
            .statement("DO", log_text("tick"));

        let report = run(
            runtime(&dispatcher).with_registry(custom_registry()).with_options(options),
            vec![looped],
        )
        .await;

        let checks = dispatcher.names().iter().filter(|n| *n == "witness").count();
        assert_eq!(logged(&dispatcher).len(), 3);
        assert_eq!(checks, 4);
        assert_eq!(report.loop_caps_hit, 1);
    }

    #[tokio::test]
    async fn test_while_condition_is_reevaluated_each_pass() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let variables = Arc::new(VariableStore::new());
        variables.preload("running", true);

        let body = chain(vec![
            log_text("once"),
            NodeSpec::new("variables_set")
                .field("VAR", "running")
                .value("VALUE", boolean(false)),
        ]);
        let looped = NodeSpec::new("while_loop")
            .value("COND", NodeSpec::new("variables_get").field("VAR", "running"))
            .statement("DO", body);

        let report = run(runtime(&dispatcher).with_variables(variables.clone()), vec![looped]).await;

        assert_eq!(logged(&dispatcher), vec!["once"]);
        assert_eq!(report.loop_caps_hit, 0);
        assert_eq!(variables.get("running", Value::Null), Value::Bool(false));
    }

    #[tokio::test]
    async fn test_while_false_never_runs() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let looped = NodeSpec::new("while_loop")
            .field("COND", "FALSE")
            .statement("DO", log_text("never"));

        run(runtime(&dispatcher), vec![looped]).await;
        assert!(dispatcher.is_empty());
    }

    fn if_chain(conditions: &[bool], with_else: bool) -> NodeSpec {
        let mut links = Vec::new();
        for (i, cond) in conditions.iter().enumerate() {
            let node_type = if i == 0 { "logic_if" } else { "logic_else_if" };
            links.push(
                NodeSpec::new(node_type)
                    .value("COND", boolean(*cond))
                    .statement("DO", log_text(&format!("branch{}", i))),
            );
        }
        if with_else {
            links.push(NodeSpec::new("logic_else").statement("DO", log_text("else")));
        }
        links.push(log_text("after"));
        chain(links)
    }

    #[tokio::test]
    async fn test_if_chain_runs_exactly_one_branch() {
        struct TestCase {
            name: &'static str,
            conditions: Vec<bool>,
            with_else: bool,
            expected: Vec<&'static str>,
        }

        let cases = vec![
            TestCase {
                name: "head matches",
                conditions: vec![true, true, true],
                with_else: true,
                expected: vec!["branch0", "after"],
            },
            TestCase {
                name: "first else-if matches",
                conditions: vec![false, true, true],
                with_else: true,
                expected: vec!["branch1", "after"],
            },
            TestCase {
                name: "last else-if matches",
                conditions: vec![false, false, true],
                with_else: true,
                expected: vec!["branch2", "after"],
            },
            TestCase {
                name: "falls through to else",
                conditions: vec![false, false],
                with_else: true,
                expected: vec!["else", "after"],
            },
            TestCase {
                name: "nothing matches, no else",
                conditions: vec![false, false],
                with_else: false,
                expected: vec!["after"],
            },
        ];

        for case in cases {
            let dispatcher = Arc::new(RecordingDispatcher::new());
            run(runtime(&dispatcher), vec![if_chain(&case.conditions, case.with_else)]).await;
            assert_eq!(logged(&dispatcher), case.expected, "case '{}'", case.name);
        }
    }

    #[tokio::test]
    async fn test_consecutive_if_chains_are_independent() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("logic_if")
                .value("COND", boolean(true))
                .statement("DO", log_text("first")),
            NodeSpec::new("logic_if")
                .value("COND", boolean(false))
                .statement("DO", log_text("second")),
            NodeSpec::new("logic_else").statement("DO", log_text("second-else")),
        ]);

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(logged(&dispatcher), vec!["first", "second-else"]);
    }

    #[tokio::test]
    async fn test_orphan_branches() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("logic_else").statement("DO", log_text("orphan-else")),
            NodeSpec::new("logic_else_if")
                .value("COND", boolean(true))
                .statement("DO", log_text("orphan-else-if")),
            NodeSpec::new("connect"),
            NodeSpec::new("logic_else").statement("DO", log_text("after-plain-task")),
        ]);

        let report = run(runtime(&dispatcher), vec![root]).await;

        assert_eq!(logged(&dispatcher), vec!["orphan-else-if"]);
        assert_eq!(report.tasks_failed, 0);
    }

    #[tokio::test]
    async fn test_if_else_picks_one_body_and_closes_chain() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("logic_if_else")
                .value("COND", boolean(false))
                .statement("DO", log_text("then"))
                .statement("ELSE", log_text("otherwise")),
            NodeSpec::new("logic_else").statement("DO", log_text("trailing-else")),
        ]);

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(logged(&dispatcher), vec!["otherwise"]);
    }

    #[tokio::test]
    async fn test_compare_drives_condition() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let compare = NodeSpec::new("logic_compare_custom")
            .field("OP", "GT")
            .value("A", num(5))
            .value("B", text("3"));
        let root = NodeSpec::new("logic_if")
            .value("COND", compare)
            .statement("DO", log_text("bigger"));

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(logged(&dispatcher), vec!["bigger"]);
    }

    #[tokio::test]
    async fn test_operation_short_circuits() {
        struct TestCase {
            name: &'static str,
            op: &'static str,
            a: bool,
            b_evaluated: bool,
            result: bool,
        }

        let cases = vec![
            TestCase { name: "or decided by A", op: "OR", a: true, b_evaluated: false, result: true },
            TestCase { name: "or needs B", op: "OR", a: false, b_evaluated: true, result: true },
            TestCase { name: "and decided by A", op: "AND", a: false, b_evaluated: false, result: false },
            TestCase { name: "and needs B", op: "AND", a: true, b_evaluated: true, result: true },
        ];

        for case in cases {
            let dispatcher = Arc::new(RecordingDispatcher::new());
            let operation = NodeSpec::new("logic_operation")
                .field("OP", case.op)
                .value("A", boolean(case.a))
                .value("B", NodeSpec::new("witness"));
            let root = log(operation);

            run(runtime(&dispatcher).with_registry(custom_registry()), vec![root]).await;

            let b_evaluated = dispatcher.names().iter().any(|n| n == "witness");
            assert_eq!(b_evaluated, case.b_evaluated, "case '{}'", case.name);
            assert_eq!(logged(&dispatcher), vec![case.result.to_string()], "case '{}'", case.name);
        }
    }

    #[tokio::test]
    async fn test_negate() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            log(NodeSpec::new("logic_negate").value("BOOL", boolean(true))),
            log(NodeSpec::new("logic_negate")),
        ]);

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(logged(&dispatcher), vec!["false", "true"]);
    }

    #[tokio::test]
    async fn test_failing_task_does_not_stop_siblings() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("connect"),
            NodeSpec::new("explode"),
            NodeSpec::new("disconnect"),
        ]);

        let report = run(runtime(&dispatcher).with_registry(custom_registry()), vec![root]).await;

        assert_eq!(dispatcher.names(), vec!["connect", "disconnect"]);
        assert_eq!(report.tasks_run, 3);
        assert_eq!(report.tasks_failed, 1);
        assert_eq!(report.state, RunState::Completed);
    }

    #[tokio::test]
    async fn test_failing_expression_falls_back_to_default() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = log(NodeSpec::new("explode"));

        let report = run(runtime(&dispatcher).with_registry(custom_registry()), vec![root]).await;

        assert_eq!(logged(&dispatcher), vec!["[log empty]"]);
        assert_eq!(report.evaluation_fallbacks, 1);
        assert_eq!(report.tasks_failed, 0);
    }

    #[tokio::test]
    async fn test_deferred_unwrap_is_bounded() {
        struct TestCase {
            name: &'static str,
            expr: NodeSpec,
            expected: &'static str,
            fallbacks: usize,
        }

        let cases = vec![
            TestCase {
                name: "settles within bound",
                expr: NodeSpec::new("onion").field("LAYERS", 32),
                expected: "core",
                fallbacks: 0,
            },
            TestCase {
                name: "one layer too many",
                expr: NodeSpec::new("onion").field("LAYERS", 33),
                expected: "[log empty]",
                fallbacks: 1,
            },
            TestCase {
                name: "never settles",
                expr: NodeSpec::new("forever"),
                expected: "[log empty]",
                fallbacks: 1,
            },
        ];

        for case in cases {
            let dispatcher = Arc::new(RecordingDispatcher::new());
            let report = run(
                runtime(&dispatcher).with_registry(custom_registry()),
                vec![log(case.expr)],
            )
            .await;

            assert_eq!(logged(&dispatcher), vec![case.expected], "case '{}'", case.name);
            assert_eq!(report.evaluation_fallbacks, case.fallbacks, "case '{}'", case.name);
        }
    }

    #[tokio::test]
    async fn test_unknown_node_is_skipped() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("connect"),
            NodeSpec::new("dht11_sensor"),
            NodeSpec::new("disconnect"),
        ]);

        let report = run(runtime(&dispatcher), vec![root]).await;

        assert_eq!(dispatcher.names(), vec!["connect", "disconnect"]);
        assert_eq!(report.nodes_skipped, 1);
        assert_eq!(report.tasks_run, 2);
    }

    #[tokio::test]
    async fn test_typed_evaluation() {
        struct TestCase {
            name: &'static str,
            text: Option<NodeSpec>,
            loud: Option<NodeSpec>,
            expected: &'static str,
        }

        let cases = vec![
            TestCase { name: "text as is", text: Some(text("hi")), loud: None, expected: "hi" },
            TestCase { name: "truthy number", text: Some(text("hi")), loud: Some(num(1)), expected: "HI" },
            TestCase { name: "falsy number", text: Some(text("hi")), loud: Some(num(0)), expected: "hi" },
            TestCase { name: "number as text", text: Some(num(5)), loud: Some(boolean(true)), expected: "5" },
            TestCase { name: "missing text", text: None, loud: None, expected: "silent" },
        ];

        for case in cases {
            let dispatcher = Arc::new(RecordingDispatcher::new());
            let mut announce = NodeSpec::new("announce");
            if let Some(text) = case.text {
                announce = announce.value("TEXT", text);
            }
            if let Some(loud) = case.loud {
                announce = announce.value("LOUD", loud);
            }

            run(runtime(&dispatcher).with_registry(custom_registry()), vec![announce]).await;
            assert_eq!(logged(&dispatcher), vec![case.expected], "case '{}'", case.name);
        }
    }

    #[test]
    fn test_resolving_a_node_outside_the_program() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let runtime = runtime(&dispatcher);
        let program = Program::snapshot(&[NodeSpec::new("connect")]).unwrap();
        let ctx = RunContext::new(&program, &runtime);

        assert!(ctx.resolve_task(NodeId(0)).is_ok());
        assert_eq!(
            ctx.resolve_task(NodeId(99)).err(),
            Some(RegistryError::MissingNode { node: NodeId(99) })
        );
    }

    #[tokio::test]
    async fn test_unknown_expression_uses_default() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = NodeSpec::new("repeat_loop")
            .value("TIMES", NodeSpec::new("math_random"))
            .statement("DO", log_text("x"));

        let report = run(runtime(&dispatcher), vec![root]).await;

        assert_eq!(logged(&dispatcher).len(), 1);
        assert_eq!(report.evaluation_fallbacks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_runs_do_not_interleave() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let engine = Engine::new(runtime(&dispatcher));

        let program = |tag: &str| {
            Program::snapshot(&[chain(vec![
                log_text(tag),
                NodeSpec::new("delay").field("DELAY", 100),
                log_text(tag),
            ])])
            .unwrap()
        };
        let first = program("a");
        let second = program("b");

        let (r1, r2) = tokio::join!(engine.run(&first), engine.run(&second));

        assert_eq!(logged(&dispatcher), vec!["a", "a", "b", "b"]);
        assert_eq!(r1.commands_dispatched, 3);
        assert_eq!(r2.commands_dispatched, 3);
        assert_eq!(engine.state(), RunState::Completed);
    }

    #[tokio::test]
    async fn test_variables_set_then_get() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let variables = Arc::new(VariableStore::new());
        variables.preload("greeting", "hi");

        let root = chain(vec![
            log(NodeSpec::new("variables_get").field("VAR", "greeting")),
            NodeSpec::new("variables_set")
                .field("VAR", "greeting")
                .value("VALUE", text("hello")),
            log(NodeSpec::new("variables_get").field("VAR", "greeting")),
            NodeSpec::new("variables_set")
                .field("VAR", "undeclared")
                .value("VALUE", num(1)),
            log(NodeSpec::new("variables_get").field("VAR", "undeclared")),
        ]);

        let report = run(runtime(&dispatcher).with_variables(variables.clone()), vec![root]).await;

        assert_eq!(logged(&dispatcher), vec!["hi", "hello", "[log empty]"]);
        assert_eq!(report.tasks_failed, 0);
        assert_eq!(variables.names(), vec!["greeting".to_string()]);
    }

    #[tokio::test]
    async fn test_variables_survive_across_runs() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let variables = Arc::new(VariableStore::new());
        variables.preload("count", 0);
        let engine = Engine::new(runtime(&dispatcher).with_variables(variables));

        let set = Program::snapshot(&[NodeSpec::new("variables_set")
            .field("VAR", "count")
            .value("VALUE", num(9))])
        .unwrap();
        let get = Program::snapshot(&[log(NodeSpec::new("variables_get").field("VAR", "count"))]).unwrap();

        engine.run(&set).await;
        engine.run(&get).await;

        assert_eq!(logged(&dispatcher), vec!["9"]);
    }

    #[tokio::test]
    async fn test_start_block_runs_its_chain_once() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            NodeSpec::new("start_block"),
            NodeSpec::new("connect"),
            NodeSpec::new("disconnect"),
        ]);

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(dispatcher.names(), vec!["start", "connect", "disconnect"]);
    }

    #[tokio::test]
    async fn test_stop_block_does_not_end_sequence() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![NodeSpec::new("stop_block"), NodeSpec::new("open_door")]);

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(dispatcher.names(), vec!["stop", "open_door"]);
    }

    #[tokio::test]
    async fn test_roots_run_in_declaration_order() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let roots = vec![
            chain(vec![NodeSpec::new("yellow_led").field("STATE", "ON"), NodeSpec::new("comment_block")]),
            NodeSpec::new("yellow_led_off"),
            NodeSpec::new("set_led").field("STATE", "OFF"),
        ];

        run(runtime(&dispatcher), roots).await;
        assert_eq!(dispatcher.names(), vec!["yellow_led_on", "yellow_led_off", "led_off"]);
    }

    #[tokio::test]
    async fn test_log_renders_values() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let root = chain(vec![
            log(num(5)),
            log(boolean(true)),
            log(text("")),
            NodeSpec::new("log_block"),
        ]);

        run(runtime(&dispatcher), vec![root]).await;
        assert_eq!(logged(&dispatcher), vec!["5", "true", "[log empty]", "[log empty]"]);
    }

    #[tokio::test]
    async fn test_engine_state_transitions() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let engine = Engine::new(runtime(&dispatcher));
        assert_eq!(engine.state(), RunState::Idle);

        let report = engine.execute(&Program::default()).await;

        assert_eq!(report.state, RunState::Completed);
        assert_eq!(report.tasks_run, 0);
        assert_eq!(engine.state(), RunState::Completed);
    }

    #[tokio::test]
    async fn test_execute_roots_rejects_duplicate_ids() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let engine = Engine::new(runtime(&dispatcher));
        let roots = vec![
            NodeSpec::new("connect").with_id("dup"),
            NodeSpec::new("disconnect").with_id("dup"),
        ];

        let result = engine.execute_roots(&roots).await;

        assert_eq!(result.err(), Some(ProgramError::DuplicateNodeId { id: "dup".to_string() }));
        assert!(dispatcher.is_empty());
    }

    async fn run_demo(file: &str) -> (Vec<String>, RunReport) {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("demos/programs")
            .join(file);
        let config = load_and_validate_config(&path).unwrap();
        let dispatcher = Arc::new(RecordingDispatcher::new());

        let runtime = RuntimeBuilder::from_config(&config, dispatcher.clone());
        let report = run(runtime, config.program).await;
        (dispatcher.names(), report)
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_programs() {
        let (names, report) = run_demo("blink.yaml").await;
        let blink = ["led_on", "delay", "led_off", "delay"];
        let mut expected = vec!["start", "connect"];
        expected.extend(blink);
        expected.extend(blink);
        expected.extend(["log", "disconnect"]);
        assert_eq!(names, expected);
        assert!(report.is_clean());

        let (names, _) = run_demo("door_guard.yaml").await;
        assert_eq!(names, vec!["connect", "yellow_led_on", "disconnect"]);

        let (names, report) = run_demo("watchdog.toml").await;
        assert_eq!(names.len(), 15);
        assert_eq!(report.loop_caps_hit, 1);
    }
}
