mod config;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser as ClapParser, Subcommand};
use log::{debug, info};

use bunsetsu_morph::LexiconAnalyzer;
use bunsetsu_parser::{analyze_mecab, ParseError, Parser};
use bunsetsu_protocol::{Analysis, Lexicon};
use bunsetsu_solver::{to_dot, to_graphml, DependencyGraph};

use crate::config::{load_config, OutputFormat};

#[derive(ClapParser)]
#[command(author, version, about = "Estimates bunsetsu dependencies for a Japanese sentence")]
struct Cli {
    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Config file (defaults to ./bunsetsu.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize TEXT with a lexicon and analyze it (reads stdin without TEXT)
    Parse {
        text: Option<String>,

        /// Lexicon file, JSON or compiled .rkyv
        #[arg(short, long, value_name = "FILE")]
        lexicon: Option<PathBuf>,
    },
    /// Analyze one sentence of MeCab (IPADIC) output
    Mecab {
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Compile a JSON lexicon to an rkyv binary
    CompileLexicon {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    let format = cli.format.unwrap_or(config.output);

    match cli.command {
        Command::Parse { text, lexicon } => {
            let mut parser = Parser::new(LexiconAnalyzer::new());
            if let Some(path) = lexicon.or(config.lexicon) {
                *parser.analyzer_mut() = load_lexicon(&path)?;
            }

            let text = match text {
                Some(text) => text,
                None => read_input(None)?,
            };
            let analysis = parser.parse(text.trim()).map_err(|e| match e {
                ParseError::NotInitialized => {
                    anyhow!("{}: pass --lexicon or set `lexicon` in the config file", e)
                }
                other => other.into(),
            })?;
            emit(&analysis, format)
        }
        Command::Mecab { input } => {
            let raw = read_input(input.as_deref())?;
            let analysis = analyze_mecab(&raw)?;
            emit(&analysis, format)
        }
        Command::CompileLexicon { input, output } => compile_lexicon(&input, &output),
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {:?}", path)),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn load_lexicon(path: &Path) -> anyhow::Result<LexiconAnalyzer> {
    info!("Loading lexicon from {:?}...", path);
    let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;

    if path.extension().is_some_and(|ext| ext == "rkyv") {
        Ok(LexiconAnalyzer::from_archive(&bytes)?)
    } else {
        let lexicon: Lexicon = serde_json::from_slice(&bytes)?;
        Ok(LexiconAnalyzer::with_lexicon(lexicon))
    }
}

fn compile_lexicon(input: &Path, output: &Path) -> anyhow::Result<()> {
    info!("Reading JSON from {:?}...", input);
    let input_data = fs::read_to_string(input)?;
    let lexicon: Lexicon = serde_json::from_str(&input_data)?;

    info!("Compiling lexicon version {} with {} entries...", lexicon.version, lexicon.entries.len());
    let bytes = rkyv::to_bytes::<_, 256>(&lexicon).map_err(|e| anyhow!("rkyv serialization failed: {:?}", e))?;

    fs::write(output, &bytes)?;
    info!("Binary written to {:?}", output);
    Ok(())
}

fn render(analysis: &Analysis, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(analysis)?,
        OutputFormat::Tree => match DependencyGraph::from_analysis(analysis).hierarchy() {
            Some(tree) => {
                debug!("rendering {} tree nodes", tree.len());
                tree.render(analysis)
            }
            None => String::new(),
        },
        OutputFormat::Graphml => to_graphml(analysis),
        OutputFormat::Dot => to_dot(analysis),
    })
}

fn emit(analysis: &Analysis, format: OutputFormat) -> anyhow::Result<()> {
    let out = render(analysis, format)?;
    print!("{}", out);
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}
