// main.rs
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pdf_catalog::api::{ImportBatch, SearchRequest};
use pdf_catalog::auth::{AdminGrant, Credentials};
use pdf_catalog::config::{self, AppConfig};
use pdf_catalog::server::{self, AppState};
use pdf_catalog::{CatalogEngine, CatalogEngineBuilder, Document, UploadOutcome};

#[derive(Parser)]
#[command(name = "pdf-catalog", version, about = "PDF 目录浏览与上传服务")]
struct Cli {
    /// 配置文件路径（默认 ./config.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 启动 HTTP 服务
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// 交互式检索
    Shell,
    /// 检索一次
    Search { query: String },
    /// 列出某个模式/科目下的 PDF
    List { mode: String, subject: String },
    /// 查看单个 PDF
    Show { subject: String, filename: String },
    /// 从 JSON 文件批量导入（上传表单数组）
    Import { file: PathBuf },
    /// 存储统计
    Stats,
    /// 生成默认配置文件
    Init {
        #[arg(default_value = config::CONFIG_FILE)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sled=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::Init { path } = &cli.command {
        AppConfig::generate_default_config(path)
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("已生成配置文件: {}", path.display());
        return Ok(());
    }

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load_or_default(path),
        None => AppConfig::load(),
    };
    if let Command::Serve { bind, port } = &cli.command {
        if let Some(bind) = bind {
            app_config.server.bind = bind.clone();
        }
        if let Some(port) = port {
            app_config.server.port = *port;
        }
    }
    let app_config = Arc::new(app_config);

    let engine = CatalogEngineBuilder::new()
        .with_config(app_config.clone())
        .build()
        .with_context(|| format!("cannot open storage at {}", app_config.storage.path))?;

    match cli.command {
        Command::Serve { .. } => serve(engine),
        Command::Shell => shell(&engine),
        Command::Search { query } => {
            run_search(&engine, &query)?;
            Ok(())
        }
        Command::List { mode, subject } => {
            let (mode, subject, documents) = engine.list_by_subject(&mode, &subject)?;
            println!("{mode} / {subject}: {} 个 PDF", documents.len());
            for doc in &documents {
                print_document(doc);
            }
            Ok(())
        }
        Command::Show { subject, filename } => {
            let doc = engine.get_document(&subject, &filename)?;
            print_document(&doc);
            if !doc.description.is_empty() {
                println!("    {}", doc.description);
            }
            Ok(())
        }
        Command::Import { file } => import(&engine, &file),
        Command::Stats => {
            let stats = engine.stats()?;
            println!("文档数: {}", stats.total_documents);
            println!("占用空间: {}", stats.storage_size_display);
            Ok(())
        }
        Command::Init { .. } => Ok(()),
    }
}

fn serve(engine: CatalogEngine) -> Result<()> {
    let credentials = Credentials::from_config(&engine.config().admin);
    if !credentials.is_enabled() {
        tracing::warn!("admin credentials are not configured, uploads are disabled");
    }
    let addr = engine.config().server_addr();
    let state = Arc::new(AppState::new(engine, credentials));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(server::serve(state, &addr))
        .with_context(|| format!("server on {addr} failed"))
}

/// 交互式检索：每行输入就是一次检索
fn shell(engine: &CatalogEngine) -> Result<()> {
    println!("--- PDF 目录检索 ---");
    println!(" 输入关键词进行检索 (输入 'quit' 退出)");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input == "quit" || input == "exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        if let Err(e) = run_search(engine, input) {
            println!("检索出错: {}", e);
        }
    }

    Ok(())
}

fn run_search(engine: &CatalogEngine, query: &str) -> Result<()> {
    let response = engine.search(&SearchRequest::new(query))?;
    if response.total == 0 {
        println!("没有找到与 \"{}\" 匹配的 PDF", response.query);
        return Ok(());
    }
    println!("找到 {} 个结果 ({} ms):", response.total, response.took_ms);
    for (i, doc) in response.results.iter().enumerate() {
        println!("{:>3}. [{} / {}] {}", i + 1, doc.mode, doc.subject, doc.title);
        println!("     {}  ->  {}", doc.url, doc.link);
    }
    Ok(())
}

fn import(engine: &CatalogEngine, file: &PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let batch: ImportBatch = serde_json::from_str(&content)
        .with_context(|| format!("invalid import file {}", file.display()))?;

    let grant = AdminGrant::local();
    let (mut created, mut duplicates, mut invalid) = (0usize, 0usize, 0usize);

    for (i, form) in batch.into_iter().enumerate() {
        match engine.upload(&grant, form)? {
            UploadOutcome::Created { .. } => created += 1,
            UploadOutcome::DuplicateExists { form, .. } => {
                duplicates += 1;
                println!(" [跳过] #{} 重复: {}", i + 1, form.title.trim());
            }
            UploadOutcome::ValidationFailed { errors, .. } => {
                invalid += 1;
                println!(" [错误] #{}: {}", i + 1, errors.join(" "));
            }
        }
    }

    println!("导入完成: 新增 {created}, 重复 {duplicates}, 无效 {invalid}");
    Ok(())
}

fn print_document(doc: &Document) {
    println!("  {} ({})", doc.title, doc.filename);
    println!("    {}", doc.link);
}
