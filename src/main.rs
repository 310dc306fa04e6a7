use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use rustdep::data::{Document, DocumentParser, GoldSentence, Lexicon, Sentence, Vocabulary};
use rustdep::digraph::{DependencyTree, SentenceGraph};
use rustdep::parser::{
    evaluate, ExampleGenerator, LookupClassifier, Parser, ParserConfig,
    ParserContext, Trainer, TrainerConfig,
};

#[derive(ClapParser, Debug)]
#[command(name = "depparse")]
#[command(about = "Arc-standard dependency parser tooling")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay the oracle over gold documents and write training examples as JSONL
    Examples {
        /// Gold documents (JSON, JSON array, JSONL, optionally gzipped)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long)]
        output: PathBuf,

        /// Parser configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Vocabulary JSON; loaded if it exists, otherwise built and saved there
        #[arg(long)]
        vocab: Option<PathBuf>,
    },

    /// Report legality, projectivity and root count of every gold sentence
    Check {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Score predicted trees against gold trees
    Evaluate {
        #[arg(short, long)]
        predicted: PathBuf,

        #[arg(short, long)]
        gold: PathBuf,
    },

    /// Train the memorising baseline and parse documents with it
    Baseline {
        /// Gold training documents
        #[arg(short, long)]
        train: PathBuf,

        /// Documents to parse; their existing dependencies are ignored
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file of parsed documents
        #[arg(short, long)]
        output: PathBuf,

        /// Cross-validation documents
        #[arg(long)]
        dev: Option<PathBuf>,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Trainer configuration (YAML)
        #[arg(long)]
        trainer_config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Examples { input, output, config, vocab } => {
            run_examples(&input, &output, config.as_deref(), vocab.as_deref())
        }
        Command::Check { input } => run_check(&input),
        Command::Evaluate { predicted, gold } => run_evaluate(&predicted, &gold),
        Command::Baseline { train, input, output, dev, config, trainer_config } => run_baseline(
            &train,
            &input,
            &output,
            dev.as_deref(),
            config.as_deref(),
            trainer_config.as_deref(),
        ),
    }
}

fn load_config(path: Option<&Path>) -> Result<ParserConfig> {
    match path {
        Some(path) => ParserConfig::from_yaml_file(path),
        None => Ok(ParserConfig::default()),
    }
}

fn load_vocabulary(path: Option<&Path>, sentences: &[GoldSentence]) -> Result<Vocabulary> {
    match path {
        Some(path) if path.exists() => {
            let vocab = Vocabulary::load(path)?;
            info!("Loaded vocabulary of {} terms from {}", vocab.len(), path.display());
            Ok(vocab)
        }
        Some(path) => {
            let vocab = Vocabulary::from_gold(sentences);
            vocab.save(path)?;
            info!("Saved vocabulary of {} terms to {}", vocab.len(), path.display());
            Ok(vocab)
        }
        None => Ok(Vocabulary::from_gold(sentences)),
    }
}

fn progress_bar(len: usize, message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message);
    Ok(pb)
}

fn gold_graphs(sentences: &[GoldSentence]) -> Result<Vec<SentenceGraph>> {
    sentences
        .iter()
        .enumerate()
        .map(|(i, s)| s.to_graph().with_context(|| format!("Sentence {} is not a graph", i)))
        .collect()
}

fn run_examples(input: &Path, output: &Path, config: Option<&Path>, vocab: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let config = load_config(config)?;
    let sentences = DocumentParser::new().load_gold(input)?;
    let vocab = load_vocabulary(vocab, &sentences)?;

    let context = ParserContext::new(Arc::new(vocab), config);
    let generator = ExampleGenerator::new(&context);

    let file = fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let pb = progress_bar(sentences.len(), "Generating examples...")?;
    let stats = generator.visit(&sentences, |examples| -> Result<()> {
        for example in examples {
            serde_json::to_writer(&mut writer, example)?;
            writer.write_all(b"\n")?;
        }
        pb.inc(1);
        Ok(())
    })?;
    writer.flush()?;
    pb.finish_with_message("Examples written");

    println!("\n=== Example Statistics ===");
    println!("{}", stats);
    println!("Output: {}", output.display());
    println!("Total time: {:.2?}", start.elapsed());
    Ok(())
}

fn run_check(input: &Path) -> Result<()> {
    let sentences = DocumentParser::new().load_gold(input)?;
    let mut usable = 0;

    for (i, sentence) in sentences.iter().enumerate() {
        match sentence.to_graph() {
            Ok(graph) => {
                let legal = graph.is_legal();
                let projective = graph.is_projective();
                let single_root = graph.has_single_root();
                if legal && projective && single_root {
                    usable += 1;
                }
                let tree = DependencyTree::from_graph(&graph);
                println!(
                    "{}\twords={}\treachable={}\tdepth={}\tlegal={}\tprojective={}\tsingle_root={}",
                    i,
                    graph.n(),
                    tree.node_count() - 1,
                    tree.depth() - 1,
                    legal,
                    projective,
                    single_root
                );
            }
            Err(e) => println!("{}\tinvalid: {}", i, e),
        }
    }

    println!("\nUsable for training: {}/{}", usable, sentences.len());
    Ok(())
}

fn run_evaluate(predicted: &Path, gold: &Path) -> Result<()> {
    let parser = DocumentParser::new();
    let predicted = gold_graphs(&parser.load_gold(predicted)?)?;
    let gold = gold_graphs(&parser.load_gold(gold)?)?;

    let performance = evaluate(&predicted, &gold)?;
    println!("{}", performance);
    Ok(())
}

fn run_baseline(
    train: &Path,
    input: &Path,
    output: &Path,
    dev: Option<&Path>,
    config: Option<&Path>,
    trainer_config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let trainer_config = match trainer_config {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("Failed to read trainer config {}", path.display()))?;
            TrainerConfig::from_yaml_str(&yaml)?
        }
        None => TrainerConfig::default(),
    };

    let doc_parser = DocumentParser::new();
    let training_set = doc_parser.load_gold(train)?;
    let cross_val_set = match dev {
        Some(path) => doc_parser.load_gold(path)?,
        None => Vec::new(),
    };

    let context = ParserContext::new(Arc::new(Vocabulary::from_gold(&training_set)), config);
    let classifier = LookupClassifier::new(context.transitions.len());
    let mut trainer = Trainer::new(context.clone(), classifier, trainer_config)
        .with_training_set(training_set)
        .with_cross_validation_set(cross_val_set);
    if let Some(best) = trainer.train()? {
        println!("=== Best Cross Validation ===\n{}", best);
    }

    let parser = Parser::new(context, trainer.into_classifier());
    let docs = doc_parser.parse_file(input)?;
    let pb = progress_bar(docs.len(), "Parsing documents...")?;

    let mut parsed = Vec::with_capacity(docs.len());
    let mut failed = 0;
    for doc in &docs {
        let inputs = doc
            .sentences
            .iter()
            .map(Sentence::tagged)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Document {} has no tagged tokens", doc.id))?;
        let sentences = parser
            .parse_many(&inputs)
            .into_iter()
            .zip(&inputs)
            .map(|(result, words)| {
                let graph = result.unwrap_or_else(|e| {
                    warn!("Failed to parse a sentence of {}: {}", doc.id, e);
                    failed += 1;
                    SentenceGraph::from_tagged(words)
                });
                Sentence::from_graph(&graph)
            })
            .collect();
        parsed.push(Document::new(doc.id.clone(), sentences));
        pb.inc(1);
    }
    pb.finish_with_message("Parsing completed");

    if parsed.is_empty() {
        return Err(anyhow!("No documents found in {}", input.display()));
    }
    let file = fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &parsed)?;

    println!("Parsed {} documents ({} sentences failed) into {}", parsed.len(), failed, output.display());
    Ok(())
}
