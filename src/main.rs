use rand::rngs::SmallRng;
use rand::SeedableRng;
use rankperm::cases::GenKind;
use rankperm::check::check_output;
use rankperm::graph::{parse_instance, parse_instances};
use rankperm::solve::{render_outcome, solve, solve_all};
use rankperm::validate::validate_input;
use std::io::{Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut multi = false;
    let mut check_paths: Option<(String, String)> = None;
    let mut validate_only = false;
    let mut gen_kind: Option<GenKind> = None;
    let mut gen_n: usize = 1000;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--multi" => {
                multi = true;
                i += 1;
            }
            "--check" => {
                let input = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let output = args.get(i + 2).unwrap_or_else(|| usage_and_exit(2));
                check_paths = Some((input.clone(), output.clone()));
                i += 3;
            }
            "--validate-input" => {
                validate_only = true;
                i += 1;
            }
            "--gen" => {
                let name = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                gen_kind = Some(GenKind::from_name(name).unwrap_or_else(|| {
                    eprintln!(
                        "Unknown generator {name:?}. Known: {}",
                        GenKind::names().join(", ")
                    );
                    std::process::exit(2);
                }));
                i += 2;
            }
            "--n" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                gen_n = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    if let Some((input_path, output_path)) = check_paths {
        let input = read_file_or_exit(&input_path);
        let output = read_file_or_exit(&output_path);
        match check_output(&input, &output) {
            Ok(()) => println!("OK"),
            Err(reason) => {
                eprintln!("Check FAILED: {reason}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(kind) = gen_kind {
        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_os_rng(),
        };
        print!("{}", kind.generate(&mut rng, gen_n));
        return;
    }

    let stdin = read_stdin_or_exit();

    if validate_only {
        match validate_input(&stdin) {
            Ok(()) => println!("OK"),
            Err(reason) => {
                eprintln!("Invalid input: {reason}");
                std::process::exit(1);
            }
        }
        return;
    }

    let rendered = if multi {
        let graphs = parse_instances(&stdin).unwrap_or_else(|e| input_error_exit(&e));
        solve_all(&graphs)
            .iter()
            .map(render_outcome)
            .collect::<String>()
    } else {
        let graph = parse_instance(&stdin).unwrap_or_else(|e| input_error_exit(&e));
        render_outcome(&solve(&graph))
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .unwrap_or_else(|e| {
            eprintln!("Failed to write output: {e}");
            std::process::exit(1);
        });
}

fn read_stdin_or_exit() -> String {
    let mut buf = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
        eprintln!("Failed to read stdin: {e}");
        std::process::exit(1);
    }
    buf
}

fn read_file_or_exit(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {path}: {e}");
        std::process::exit(1);
    })
}

fn input_error_exit(err: &rankperm::graph::InputError) -> ! {
    eprintln!("Malformed input: {err}");
    std::process::exit(1);
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  rankperm                       Solve one instance from stdin\n  rankperm --multi               Solve T-prefixed instances from stdin (parallel)\n  rankperm --check IN OUT        Verify a candidate output against an input\n  rankperm --validate-input      Validate an input on stdin against the constraints\n  rankperm --gen NAME [--n N] [--seed SEED]\n                                 Emit a generated instance (names: chain,\n                                 overflow-chain, star, random, contradiction)\n"
    );
    std::process::exit(code)
}
