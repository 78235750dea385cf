//! # tween-host
//!
//! 命令行入口：在真实时钟下驱动一个元素，或采样缓动曲线。
//!
//! ## 用法
//!
//! ```bash
//! # 1 秒内把元素从 0 平移到 100
//! cargo run -p tween-host -- run --style x --from 0 --to 100
//!
//! # 二维平移，quadrantic 缓动
//! cargo run -p tween-host -- run --style xy --from 0,0 --to 40,80 --easing quadrantic --shape 2
//!
//! # 样式属性，带单位后缀
//! cargo run -p tween-host -- run --style width --from 100 --to 200 --ext px --duration 0.5
//!
//! # 采样曲线
//! cargo run -p tween-host -- sample --easing bounce --ease easeInOut --points 21
//!
//! # 使用配置文件
//! cargo run -p tween-host -- --config tween.json --verbose run --to 10
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tween_host::{
    AnimatedElement, Element, ElementCall, HostResult, StyleTarget, SystemClock, TimerScheduler,
    TweenConfig,
};
use tween_runtime::{
    AnimateOptions, Animation, Clock, DeltaSpec, EaseMode, ManualClock, ManualScheduler, Point,
    TweenValue,
};

#[derive(Parser)]
#[command(name = "tween-host")]
#[command(about = "帧驱动补间动画 - 命令行宿主")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径（默认：tween.json）
    #[arg(short, long, default_value = "tween.json", global = true)]
    config: PathBuf,

    /// 输出 debug 级别日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 在真实时钟下驱动一个元素，并打印每一次元素调用
    Run {
        /// 样式目标：x / y / xy / 样式属性名
        #[arg(short, long, default_value = "x")]
        style: String,

        /// 起点（数值，或 `x,y` 形式的点）
        #[arg(long, default_value = "0", value_parser = parse_value)]
        from: TweenValue,

        /// 终点（数值，或 `x,y` 形式的点）
        #[arg(long, value_parser = parse_value)]
        to: TweenValue,

        /// 时长（秒），不设置时取配置
        #[arg(short, long)]
        duration: Option<f64>,

        /// 每帧之间的延迟（秒），不设置时取配置
        #[arg(long)]
        delay: Option<f64>,

        #[command(flatten)]
        curve: CurveArgs,

        /// 样式属性的单位后缀
        #[arg(long, default_value = "")]
        ext: String,
    },

    /// 按等间隔采样一条缓动曲线
    Sample {
        #[command(flatten)]
        curve: CurveArgs,

        /// 采样点数量（含两端）
        #[arg(short, long, default_value = "11")]
        points: usize,
    },
}

/// 缓动参数，不设置时取配置
#[derive(clap::Args)]
struct CurveArgs {
    /// 缓动方向：easeOut / easeInOut / easeInOut_delta / 其它视为不变换
    #[arg(long)]
    ease: Option<String>,

    /// 缓动函数名称
    #[arg(long)]
    easing: Option<String>,

    /// 缓动函数的形状参数
    #[arg(long)]
    shape: Option<f64>,

    /// 第二段缓动函数（仅 easeInOut_delta 使用）
    #[arg(long)]
    second: Option<String>,
}

impl CurveArgs {
    fn mode(&self, config: &TweenConfig) -> EaseMode {
        self.ease
            .as_deref()
            .map(EaseMode::from_name)
            .unwrap_or(config.default_ease)
    }

    fn first(&self, config: &TweenConfig) -> DeltaSpec {
        DeltaSpec {
            name: self
                .easing
                .clone()
                .unwrap_or_else(|| config.default_delta.name.clone()),
            shape_param: self.shape.unwrap_or(config.default_delta.shape_param),
        }
    }

    fn second(&self) -> Option<DeltaSpec> {
        self.second
            .as_deref()
            .map(|name| DeltaSpec::new(name, self.shape.unwrap_or(1.0)))
    }
}

/// 解析端点：`12.5` 为数值，`3,4` 为点
fn parse_value(s: &str) -> Result<TweenValue, String> {
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("无法解析数值 '{part}': {e}"))
    };

    match s.split_once(',') {
        Some((x, y)) => Ok(TweenValue::Point(Point::new(parse(x)?, parse(y)?))),
        None => Ok(TweenValue::Scalar(parse(s)?)),
    }
}

/// 把每一次调用连同时间戳打印到标准输出的元素
struct StdoutElement {
    clock: Rc<SystemClock>,
}

impl StdoutElement {
    fn print(&self, call: ElementCall) {
        println!("{:>8.1}ms  {call}", self.clock.now_ms());
    }
}

impl Element for StdoutElement {
    fn set_translate_x(&self, x: f64) {
        self.print(ElementCall::TranslateX(x));
    }

    fn set_translate_y(&self, y: f64) {
        self.print(ElementCall::TranslateY(y));
    }

    fn set_translate(&self, x: f64, y: f64) {
        self.print(ElementCall::Translate(x, y));
    }

    fn style(&self, name: &str, value: &str) {
        self.print(ElementCall::Style {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

fn init_tracing(config: &TweenConfig, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        config.debug.log_level.parse().unwrap_or(Level::INFO)
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = TweenConfig::load(&cli.config);
    init_tracing(&config, cli.verbose);

    if let Err(e) = real_main(cli.command, config) {
        eprintln!("❌ {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main(command: Commands, config: TweenConfig) -> HostResult<()> {
    config.validate()?;

    match command {
        Commands::Run {
            style,
            from,
            to,
            duration,
            delay,
            curve,
            ext,
        } => run(&config, &style, from, to, duration, delay, &curve, ext),
        Commands::Sample { curve, points } => sample(&config, &curve, points),
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    config: &TweenConfig,
    style: &str,
    from: TweenValue,
    to: TweenValue,
    duration: Option<f64>,
    delay: Option<f64>,
    curve: &CurveArgs,
    ext: String,
) -> HostResult<()> {
    let clock = Rc::new(SystemClock::new());
    let scheduler = Rc::new(TimerScheduler::with_interval(
        clock.clone(),
        config.frame_interval_ms,
    ));
    let element = Rc::new(StdoutElement {
        clock: clock.clone(),
    });
    let animated =
        AnimatedElement::with_config(element, scheduler.clone(), clock.clone(), config.clone());

    let first = curve.first(config);
    let second = curve.second();
    let delta = animated.set_delta(curve.mode(config), Some(&first), second.as_ref());

    let mut options = AnimateOptions::new()
        .with_start(from)
        .with_end(to)
        .with_delta(delta)
        .with_ext(ext)
        .with_callback(|frame| {
            info!(progress = frame.progress, "动画完成");
        });
    if let Some(seconds) = duration {
        options = options.with_duration(seconds);
    }
    if let Some(seconds) = delay {
        options = options.with_delay(seconds);
    }

    animated.animate(StyleTarget::parse(style), options)?;
    debug!(
        interval = scheduler.interval(),
        log_frames = animated.config().debug.log_frames,
        "开始驱动"
    );
    let frames = scheduler.run_until_idle();
    debug!(frames, state = ?animated.state(), "调度器空闲");
    Ok(())
}

fn sample(config: &TweenConfig, curve: &CurveArgs, points: usize) -> HostResult<()> {
    let first = curve.first(config);
    println!(
        "{}({}) {}",
        first.name,
        first.shape_param,
        curve.mode(config).name()
    );

    for (progress, eased) in sample_curve(config, curve, points)? {
        println!("{progress:>6.3}  {eased:>9.5}");
    }
    Ok(())
}

/// 在 1 秒的动画上按等间隔采样，返回 `(progress, eased)`
///
/// 每个采样点都把时钟直接设到 `i / (points - 1)` 秒再执行一帧，
/// 最后一个采样点恰好是 1 秒。
fn sample_curve(
    config: &TweenConfig,
    curve: &CurveArgs,
    points: usize,
) -> HostResult<Vec<(f64, f64)>> {
    let points = points.max(2);
    let scheduler = Rc::new(ManualScheduler::new());
    let clock = Rc::new(ManualClock::new(0.0));
    let animation = Animation::new(scheduler.clone(), clock.clone());

    let first = curve.first(config);
    let second = curve.second();
    let delta = animation.set_delta(curve.mode(config), Some(&first), second.as_ref());

    let rows = Rc::new(RefCell::new(Vec::with_capacity(points)));
    let sink = rows.clone();
    animation.animate(
        AnimateOptions::new()
            .with_start(0.0)
            .with_end(1.0)
            .with_duration(1.0)
            .with_delta(delta)
            .with_action(move |frame| sink.borrow_mut().push((frame.progress, frame.eased))),
    )?;

    let last = (points - 1) as f64;
    for i in 1..points {
        if scheduler.is_idle() {
            break;
        }
        let at = i as f64 * 1000.0 / last;
        clock.set(at);
        scheduler.run_frame(at);
    }
    debug!(points, state = ?animation.state(), "采样完成");

    Ok(rows.take())
}
