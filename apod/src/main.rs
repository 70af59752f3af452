use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use apod::{fetch_daily_image, PhotoInfoRequest, DEMO_API_KEY};
use chrono::NaiveDate;
use clap::Parser;
use courier::{HttpClient, HttpClientOption};
use tracing_subscriber::EnvFilter;

/// 下载 NASA 每日天文图
#[derive(Debug, Parser)]
#[command(name = "apod", version, about)]
struct Args {
    /// api.nasa.gov 的 API key
    #[arg(long, env = "APOD_API_KEY", default_value = DEMO_API_KEY)]
    api_key: String,

    /// 日期（YYYY-MM-DD），缺省为当天
    #[arg(long)]
    date: Option<NaiveDate>,

    /// 保存图片的路径，格式由扩展名决定
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 单次请求超时（毫秒）
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// 以 JSON 输出元信息
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let timeout = Duration::from_millis(args.timeout_ms);
    let option = HttpClientOption::builder()
        .timeout(timeout)
        .read_timeout(timeout)
        .build()?;
    let client = HttpClient::new(option)?;

    let mut request = PhotoInfoRequest::new(args.api_key);
    if let Some(date) = args.date {
        request = request.with_date(date);
    }
    let daily = fetch_daily_image(&client, &request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&daily.info)?);
    } else {
        println!("{}", daily.info.title);
        if let Some(copyright) = &daily.info.copyright {
            println!("© {}", copyright.trim());
        }
        println!("{}", daily.info.url);
        println!("{}x{}", daily.image.width(), daily.image.height());
        println!();
        println!("{}", daily.info.description);
    }

    if let Some(path) = &args.output {
        daily
            .image
            .save(path)
            .with_context(|| format!("failed to save image to {}", path.display()))?;
        tracing::info!(path = %path.display(), "image saved");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
