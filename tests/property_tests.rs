//! Property-based tests for logora using proptest

use logora::core::template;
use logora::prelude::*;
use logora::writers::{FileWriter, MemoryWriter, WriterCall};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Error),
        Just(LogLevel::Warning),
        Just(LogLevel::Success),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
    ]
}

fn any_type() -> impl Strategy<Value = LogType> {
    (0u32..7).prop_map(|code| LogType::from_code(code).unwrap())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// A level permits another exactly when its rank is at least as large
    #[test]
    fn test_permits_matches_rank(configured in any_level(), severity in any_level()) {
        prop_assert_eq!(configured.permits(severity), configured.rank() >= severity.rank());
        prop_assert!(configured.permits(LogLevel::Error));
    }
}

// ============================================================================
// Template Tests
// ============================================================================

proptest! {
    /// Templates without an opening brace are returned unchanged
    #[test]
    fn test_template_without_braces_is_identity(
        text in "[^{]*",
        args in prop::collection::vec(".*", 0..4)
    ) {
        let args: Vec<LogArg> = args.into_iter().map(LogArg::from).collect();
        prop_assert_eq!(template::format(&text, &args), text);
    }

    /// An in-range placeholder renders as its argument, even when the
    /// argument itself looks like a placeholder
    #[test]
    fn test_in_range_placeholder(
        args in prop::collection::vec(".*", 1..6),
        pick in any::<prop::sample::Index>()
    ) {
        let index = pick.index(args.len());
        let values: Vec<LogArg> = args.iter().map(LogArg::from).collect();

        let rendered = template::format(&format!("<{{{}}}>", index), &values);
        prop_assert_eq!(rendered, format!("<{}>", args[index]));
    }

    /// Placeholders past the end of the argument list stay verbatim
    #[test]
    fn test_out_of_range_placeholder(
        args in prop::collection::vec("[a-z]*", 0..4),
        extra in 0usize..100
    ) {
        let values: Vec<LogArg> = args.iter().map(LogArg::from).collect();
        let placeholder = format!("{{{}}}", args.len() + extra);

        prop_assert_eq!(template::format(&placeholder, &values), placeholder);
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// An entry reaches an output iff its type bypasses filtering or the
    /// output's level permits its severity
    #[test]
    fn test_filtering_rule(level in any_level(), log_type in any_type()) {
        let writer = MemoryWriter::new();
        let logger = Logger::builder()
            .flush_mode(FlushMode::Manual)
            .output(Output::new("memory", writer.clone()).with_level(level))
            .build();

        logger.log(log_type, "message", ());
        logger.flush().unwrap();

        let expected = log_type.severity().map_or(true, |s| level.permits(s));
        prop_assert_eq!(writer.len() == 1, expected);
    }

    /// Delivery order always equals call order
    #[test]
    fn test_fifo_for_any_call_sequence(ops in prop::collection::vec(0u8..4, 1..40)) {
        let writer = MemoryWriter::new();
        let logger = Logger::builder()
            .flush_mode(FlushMode::Manual)
            .queue_limit(QueueLimit::Unbounded)
            .output(Output::new("memory", writer.clone()).with_level(LogLevel::Debug))
            .build();

        let mut expected = Vec::new();
        for (i, op) in ops.iter().enumerate() {
            match op {
                0 => {
                    logger.title(format!("t{}", i));
                    expected.push(format!("title t{}", i));
                }
                1 => {
                    logger.empty(i);
                    expected.push(format!("empty {}", i));
                }
                2 => {
                    logger.print(format!("p{}", i), ());
                    expected.push(format!("print p{}", i));
                }
                _ => {
                    logger.debug(format!("d{}", i), ());
                    expected.push(format!("log d{}", i));
                }
            }
        }
        logger.flush().unwrap();

        let observed: Vec<String> = writer
            .calls()
            .into_iter()
            .map(|call| match call {
                WriterCall::Title(t) => format!("title {}", t),
                WriterCall::Empty(n) => format!("empty {}", n),
                WriterCall::Print { message, .. } => format!("print {}", message),
                WriterCall::Log(entry) => format!("log {}", entry.message),
                WriterCall::Clear => "clear".to_string(),
            })
            .collect();
        prop_assert_eq!(observed, expected);
    }

    /// A bounded queue never holds more than its capacity
    #[test]
    fn test_queue_never_exceeds_capacity(capacity in 1usize..20, calls in 0usize..60) {
        let logger = Logger::builder()
            .flush_mode(FlushMode::Manual)
            .queue_limit(QueueLimit::Bounded(capacity))
            .writer("memory", MemoryWriter::new())
            .build();

        for i in 0..calls {
            logger.info("{0}", [i]);
        }

        prop_assert_eq!(logger.pending_len(), calls.min(capacity));
        prop_assert_eq!(logger.dropped_count() as usize, calls.saturating_sub(capacity));
    }
}

// ============================================================================
// FileWriter Sanitization Tests (Security Critical!)
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever the message contains, one entry produces one line
    #[test]
    fn test_file_entry_is_single_line(message in ".*", arg in ".*") {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prop.log");

        let mut writer = FileWriter::new(&path).unwrap();
        writer
            .log(&LogEntry::new(LogType::Info, message, vec![LogArg::from(arg)]))
            .unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        prop_assert_eq!(content.matches('\n').count(), 1);
        prop_assert!(!content.contains('\r'));
    }
}
