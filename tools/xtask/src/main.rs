//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 tween-runtime 覆盖率
//! - `curves`: 打印所有缓动函数的采样表

use std::process::{Command, ExitCode};

use tween_runtime::EasingKind;

/// 采样点数量（含两端）
const CURVE_POINTS: usize = 11;

/// 门禁检查，按顺序执行，任一步失败即停止
const CHECK_ALL: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

/// 运行时覆盖率（需要 cargo-llvm-cov）
const COV_RUNTIME: &[&str] = &["llvm-cov", "-p", "tween-runtime", "--html"];

/// 执行 `cargo <args>`
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {line}");
    let status = Command::new("cargo").args(args).status()?;
    anyhow::ensure!(status.success(), "{line} failed with {status}");
    Ok(())
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => CHECK_ALL.iter().try_for_each(|step| cargo(step))?,
        "cov-runtime" => {
            cargo(COV_RUNTIME)?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "curves" => {
            let shape = match args.next() {
                Some(s) => s
                    .parse::<f64>()
                    .map_err(|e| anyhow::anyhow!("无效的形状参数 '{s}': {e}"))?,
                None => 1.0,
            };
            print_curves(shape)?;
        }
        "help" | "-h" | "--help" => print_help(),
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       cargo fmt --check、clippy、test
  cov-runtime     tween-runtime 覆盖率报告（需要 cargo-llvm-cov）
  curves [shape]  打印所有缓动函数在 [0, 1] 上的采样表，形状参数默认为 1

  curves 中出现非有限值时命令失败。
"#
    );
}

/// 打印采样表，任何非有限值都视为错误
fn print_curves(shape: f64) -> anyhow::Result<()> {
    print!("{:>8}", "p");
    for kind in EasingKind::ALL {
        print!("{:>12}", kind.name());
    }
    println!();

    let mut bad = Vec::new();
    for i in 0..CURVE_POINTS {
        let p = i as f64 / (CURVE_POINTS - 1) as f64;
        print!("{p:>8.2}");
        for kind in EasingKind::ALL {
            let v = kind.apply(p, shape);
            if !v.is_finite() {
                bad.push(format!("{}({p})", kind.name()));
            }
            print!("{v:>12.5}");
        }
        println!();
    }

    if !bad.is_empty() {
        anyhow::bail!("非有限值: {}", bad.join(", "));
    }
    Ok(())
}
