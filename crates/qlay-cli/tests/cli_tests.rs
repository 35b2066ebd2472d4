//! CLI command parsing and utility tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`), circuit file
//! loading, error paths, and the stdout of the built `qlay` binary.

// ============================================================================
// Circuit file loading
// ============================================================================

mod circuit_loading {
    use qlay_cli::cli::OutputFormat;
    use qlay_cli::commands::common::{load_circuit, parse_circuit, simulate};
    use qlay_engine::SimulationConfig;
    use qlay_ir::Orientation;
    use std::io::Write;

    const BELL_YAML: &str = "\
qubits: 2
gates:
  - { gate: M, line: 0, position: 200 }
  - { gate: H, line: 0, position: 0 }
  - { gate: CNOT, line: 1, position: 100, orientation: up }
  - { gate: M, line: 1, position: 200 }
";

    #[test]
    fn test_parse_yaml() {
        let file = parse_circuit(BELL_YAML, "yaml").unwrap();
        assert_eq!(file.qubits, 2);
        assert_eq!(file.gates.len(), 4);
        assert_eq!(file.gates[2].orientation, Orientation::Up);
        assert_eq!(file.gates[0].orientation, Orientation::Down);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"qubits": 1, "gates": [{"gate": "Rx", "position": 0, "angles": [180]}]}"#;
        let file = parse_circuit(json, "json").unwrap();
        assert_eq!(file.gates[0].line, 0);
        let placements = file.placements();
        assert!((placements[0].angle_args[0] - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_parse_rejects_missing_qubits() {
        assert!(parse_circuit("gates: []", "yaml").is_err());
        assert!(parse_circuit("{\"gates\": []}", "json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bell.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(BELL_YAML.as_bytes()).unwrap();

        let circuit = load_circuit(path.to_str().unwrap()).unwrap();
        assert_eq!(circuit.qubits, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_circuit("/nonexistent/circuit.yaml").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_simulate_loaded_bell() {
        let file = parse_circuit(BELL_YAML, "yaml").unwrap();
        let config = SimulationConfig {
            trials: 200,
            seed: Some(3),
            ..Default::default()
        };
        let result = simulate(&file.placements(), file.qubits, &config, OutputFormat::Json).unwrap();
        assert_eq!(result.get("M0"), result.get("M1"));
        assert_eq!(result.completed_trials(), 200);
    }

    #[test]
    fn test_simulate_unknown_gate() {
        let file = parse_circuit("qubits: 1\ngates: [{ gate: FOO, position: 0 }]", "yaml").unwrap();
        let err = simulate(&file.placements(), 1, &SimulationConfig::default(), OutputFormat::Json)
            .unwrap_err();
        assert!(err.to_string().contains("FOO"));
    }

    #[test]
    fn test_simulate_rejects_non_finite_angle() {
        let file = parse_circuit(
            "qubits: 1\ngates: [{ gate: Rx, position: 0, angles: [.nan] }]",
            "yaml",
        )
        .unwrap();
        let config = SimulationConfig {
            trials: 10,
            ..Default::default()
        };
        let err = simulate(&file.placements(), 1, &config, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }
}

// ============================================================================
// Binary output
// ============================================================================

mod binary_output {
    use std::process::Command;

    use qlay_engine::SimulationResult;

    fn qlay(args: &[&str]) -> std::process::Output {
        Command::new(env!("CARGO_BIN_EXE_qlay"))
            .args(args)
            .env_remove("QLAY_TRIALS")
            .env_remove("QLAY_SEED")
            .env_remove("QLAY_WORKERS")
            .env_remove("QLAY_MAX_QUBITS")
            .output()
            .unwrap()
    }

    #[test]
    fn test_demo_json_stdout_is_a_single_document() {
        let output = qlay(&[
            "demo", "hadamard", "--trials", "50", "--seed", "1", "--format", "json",
        ]);
        assert!(output.status.success());

        let result: SimulationResult = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(result.completed_trials(), 50);
        let tally = result.get("M0").unwrap();
        assert_eq!(tally.zeros + tally.ones, 50);
    }

    #[test]
    fn test_run_json_stdout_is_a_single_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.json");
        std::fs::write(
            &path,
            r#"{"qubits": 1, "gates": [{"gate": "X", "position": 0}, {"gate": "M", "position": 1}]}"#,
        )
        .unwrap();

        let output = qlay(&[
            "run", "-i", path.to_str().unwrap(), "-t", "20", "-f", "json", "-vv",
        ]);
        assert!(output.status.success());

        let result: SimulationResult = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(result.get("M0").unwrap().ones, 20);
    }

    #[test]
    fn test_unknown_demo_exits_with_error() {
        let output = qlay(&["demo", "teleport"]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown demo"));
    }
}

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use clap::Parser;
    use qlay_cli::cli::{Cli, Commands, OutputFormat};

    #[test]
    fn test_run_minimal() {
        let cli = Cli::try_parse_from(["qlay", "run", "-i", "bell.yaml"]).unwrap();
        match cli.command {
            Commands::Run { input, trials } => {
                assert_eq!(input, "bell.yaml");
                assert_eq!(trials.trials, None);
                assert_eq!(trials.seed, None);
                assert_eq!(trials.format, OutputFormat::Table);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_all_options() {
        let cli = Cli::try_parse_from([
            "qlay", "run", "--input", "c.json", "--trials", "500", "--seed", "9", "--workers",
            "4", "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { input, trials } => {
                assert_eq!(input, "c.json");
                assert_eq!(trials.trials, Some(500));
                assert_eq!(trials.seed, Some(9));
                assert_eq!(trials.workers, Some(4));
                assert_eq!(trials.format, OutputFormat::Json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_requires_input() {
        assert!(Cli::try_parse_from(["qlay", "run"]).is_err());
    }

    #[test]
    fn test_run_rejects_non_numeric_trials() {
        assert!(Cli::try_parse_from(["qlay", "run", "-i", "c.yaml", "-t", "many"]).is_err());
    }

    #[test]
    fn test_demo_with_and_without_name() {
        let cli = Cli::try_parse_from(["qlay", "demo", "bell", "-t", "10"]).unwrap();
        match cli.command {
            Commands::Demo { name, trials } => {
                assert_eq!(name.as_deref(), Some("bell"));
                assert_eq!(trials.trials, Some(10));
            }
            _ => panic!("Expected Demo command"),
        }

        let cli = Cli::try_parse_from(["qlay", "demo"]).unwrap();
        assert!(matches!(cli.command, Commands::Demo { name: None, .. }));
    }

    #[test]
    fn test_gates_and_version() {
        let cli = Cli::try_parse_from(["qlay", "gates"]).unwrap();
        assert!(matches!(cli.command, Commands::Gates));
        let cli = Cli::try_parse_from(["qlay", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["qlay", "version"]).unwrap();
        assert_eq!(cli.log_filter(), "warn");
        let cli = Cli::try_parse_from(["qlay", "-v", "version"]).unwrap();
        assert_eq!(cli.log_filter(), "info");
        let cli = Cli::try_parse_from(["qlay", "-vv", "version"]).unwrap();
        assert_eq!(cli.log_filter(), "debug");
        let cli = Cli::try_parse_from(["qlay", "version", "-vvv"]).unwrap();
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn test_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["qlay"]).is_err());
    }
}
