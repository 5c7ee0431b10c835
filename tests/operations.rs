use oplog_core::backend::MemoryBackend;
use oplog_core::logger::{FAILED, FINISHED, STARTED};
use oplog_core::{log_info, log_op, push_prefix, Logger, Severity};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum StackOp {
    Push(String),
    Pop,
}

fn stack_ops() -> impl Strategy<Value = Vec<StackOp>> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,6}".prop_map(StackOp::Push),
            Just(StackOp::Pop),
        ],
        0..40,
    )
}

proptest! {
    #[test]
    fn prefix_stack_matches_model(ops in stack_ops()) {
        let memory = MemoryBackend::new();
        let mut logger = Logger::from_backend(memory.clone());
        let mut model: Vec<String> = Vec::new();
        let mut empty_pops = 0usize;

        for op in ops {
            match op {
                StackOp::Push(label) => {
                    push_prefix!(logger, "{}", label);
                    model.push(label);
                }
                StackOp::Pop => {
                    if model.pop().is_none() {
                        empty_pops += 1;
                    }
                    logger.pop_prefix();
                }
            }
        }

        prop_assert_eq!(logger.prefixes(), model.as_slice());
        prop_assert_eq!(memory.messages_at(Severity::Debug).len(), empty_pops);

        log_info!(logger, "checkpoint").unwrap();
        let expected: String = model
            .iter()
            .map(|p| format!("{}: ", p))
            .chain(std::iter::once("checkpoint".to_string()))
            .collect();
        prop_assert_eq!(memory.messages().last().cloned(), Some(expected));
    }

    #[test]
    fn op_ids_count_up_in_hex(n in 1u64..64) {
        let memory = MemoryBackend::new();
        let mut logger = Logger::from_backend(memory.clone());

        for _ in 0..n {
            log_op!(logger, |_| Ok::<_, String>(()), "tick").unwrap();
        }

        let started: Vec<String> = memory
            .messages()
            .into_iter()
            .filter(|m| m.contains(STARTED))
            .collect();
        let expected: Vec<String> = (1..=n)
            .map(|id| format!("op({:x}): {} tick", id, STARTED))
            .collect();
        prop_assert_eq!(started, expected);
    }
}

#[test]
fn nested_ops_restore_surrounding_context() {
    let memory = MemoryBackend::new();
    let mut logger = Logger::from_backend(memory.clone());
    push_prefix!(logger, "stage({})", "files");
    let before = logger.prefixes().to_vec();

    let result: Result<(), String> = log_op!(
        logger,
        |outer: &mut Logger| {
            log_op!(outer, |_| Ok::<_, String>(()), "write {}", "/etc/hostname")?;
            log_op!(
                outer,
                |inner: &mut Logger| log_op!(inner, |_| Err::<(), _>("EACCES".to_string()), "chmod"),
                "write {}",
                "/etc/shadow"
            )
        },
        "populate"
    );

    assert_eq!(result.unwrap_err(), "EACCES");
    assert_eq!(logger.prefixes(), before.as_slice());

    let messages = memory.messages();
    assert_eq!(
        messages,
        vec![
            format!("stage(files): op(1): {} populate", STARTED),
            format!("stage(files): op(1): op(2): {} write /etc/hostname", STARTED),
            format!("stage(files): op(1): op(2): {} write /etc/hostname", FINISHED),
            format!("stage(files): op(1): op(3): {} write /etc/shadow", STARTED),
            format!("stage(files): op(1): op(3): op(4): {} chmod", STARTED),
            format!("stage(files): op(1): op(3): op(4): {} chmod: EACCES", FAILED),
            format!("stage(files): op(1): op(3): {} write /etc/shadow: EACCES", FAILED),
            format!("stage(files): op(1): {} populate: EACCES", FAILED),
        ]
    );

    // One failed line per failing level, none of them finished.
    assert_eq!(memory.messages_at(Severity::Critical).len(), 3);
}

#[test]
fn fallback_logger_stays_usable() {
    let memory = MemoryBackend::new();
    let mut logger = Logger::open_or_fallback(
        Err::<MemoryBackend, _>("connection refused"),
        memory.clone(),
    );

    let errors = memory.messages_at(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("connection refused"));

    log_op!(logger, |_| Ok::<_, String>(()), "after fallback").unwrap();
    assert!(memory
        .messages()
        .iter()
        .any(|m| m == &format!("op(1): {} after fallback", FINISHED)));
}

#[cfg(unix)]
#[test]
fn subprocess_failure_carries_output() {
    use std::process::Command;

    use oplog_core::log_cmd;

    let memory = MemoryBackend::new();
    let mut logger = Logger::from_backend(memory.clone());

    let mut cmd = Command::new("sh");
    cmd.args(["-c", "echo out; exit 1"]);
    let err = log_cmd!(logger, &mut cmd, "failing step").unwrap_err();

    let text = err.to_string();
    assert!(text.contains("out"));
    assert!(text.contains("exit status: 1"));

    let failed = memory.messages_at(Severity::Critical);
    assert_eq!(failed.len(), 1);
    assert!(failed[0].contains(r#"Stdout: "out\n""#));
}
