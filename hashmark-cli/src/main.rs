use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

use hashmark_core::algo::{DigestAlgorithm, DigestEncoding};
use hashmark_core::codec;
use hashmark_core::compute::{compute_file_manifest, compute_manifest, ComputeOptions};
use hashmark_core::digest::digest_file;
use hashmark_core::manifest::{Manifest, ManifestEntry, ManifestFormat};
use hashmark_core::report::VerifyStatus;
use hashmark_core::verify::{verify_directory, verify_file, VerifyOptions};
use hashmark_core::walk;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Hash,
    Hashb64,
    Hexhash,
    Hashfiles,
    Txthashfiles,
}

impl From<FormatArg> for ManifestFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Hash => Self::Hash,
            FormatArg::Hashb64 => Self::HashB64,
            FormatArg::Hexhash => Self::HexHash,
            FormatArg::Hashfiles => Self::HashFiles,
            FormatArg::Txthashfiles => Self::TxtHashFiles,
        }
    }
}

#[derive(Parser)]
#[command(name = "hashmark", version, about = "File and directory digest manifests")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Hash a file or directory tree into a manifest
    Create {
        /// File or directory to hash
        input: PathBuf,
        /// Manifest to write (default: <input>.<format extension>)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "SHA-256")]
        algorithm: DigestAlgorithm,
        /// Digest text encoding for formats that do not imply one
        #[arg(long, default_value = "HEX")]
        encoding: DigestEncoding,
        /// Manifest format (default: hexhash for files, hashfiles for directories)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Descend into subdirectories
        #[arg(long, default_value_t = false)]
        recursive: bool,
        /// Only hash paths matching these globs (directories only)
        #[arg(long)]
        include: Vec<String>,
        /// Skip paths matching these globs (directories only)
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Verify a file or directory tree against a manifest
    Check {
        /// File or directory to verify
        input: PathBuf,
        /// Manifest to verify against
        hashes: PathBuf,
        #[arg(long, default_value = "SHA-256")]
        algorithm: DigestAlgorithm,
        #[arg(long, default_value = "HEX")]
        encoding: DigestEncoding,
        #[arg(long, default_value_t = false)]
        recursive: bool,
        /// Also flag files on disk that the manifest does not list
        #[arg(long, default_value_t = false)]
        strict: bool,
        /// Write the XML verification report here
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Create { input, output, algorithm, encoding, format, recursive, include, exclude } => {
            create(&input, output, algorithm, encoding, format, recursive, &include, &exclude)
        }
        Cmd::Check { input, hashes, algorithm, encoding, recursive, strict, report } => {
            check(&input, &hashes, algorithm, encoding, recursive, strict, report)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn create(
    input: &Path,
    output: Option<PathBuf>,
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
    format: Option<FormatArg>,
    recursive: bool,
    include: &[String],
    exclude: &[String],
) -> Result<()> {
    let md = std::fs::metadata(input).with_context(|| format!("stat {}", input.display()))?;
    let format: ManifestFormat = format
        .map(Into::into)
        .unwrap_or(if md.is_dir() { ManifestFormat::HashFiles } else { ManifestFormat::HexHash });

    let manifest = if md.is_dir() {
        if format.is_single_digest() {
            bail!("format {:?} holds a single digest, input is a directory", format.extension());
        }
        if include.is_empty() && exclude.is_empty() {
            compute_manifest(input, &ComputeOptions { algorithm, encoding, recursive }, None)?
        } else {
            let (inc, exc) = build_globset(include, exclude)?;
            let mut entries = Vec::new();
            for rel in walk::enumerate(input, recursive)? {
                if !inc.is_match(&rel) || exc.is_match(&rel) {
                    continue;
                }
                let digest = digest_file(&input.join(&rel), algorithm)?;
                entries.push(ManifestEntry { rel_path: rel, digest });
            }
            Manifest::new(algorithm, encoding, entries)?
        }
    } else {
        if !format.is_single_digest() {
            bail!("format {:?} is a directory manifest, input is a file", format.extension());
        }
        compute_file_manifest(input, algorithm, encoding)?
    };

    let out_path = output.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", input.display(), format.extension()))
    });
    let bytes = codec::encode(&manifest, format)?;
    std::fs::write(&out_path, bytes).with_context(|| format!("write {}", out_path.display()))?;
    println!("{} entries -> {}", manifest.len(), out_path.display());
    Ok(())
}

fn check(
    input: &Path,
    hashes: &Path,
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
    recursive: bool,
    strict: bool,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let md = std::fs::metadata(input).with_context(|| format!("stat {}", input.display()))?;
    if !md.is_dir() {
        if verify_file(hashes, input, algorithm, encoding)? {
            println!("OK: {} matches {}", input.display(), hashes.display());
            return Ok(());
        }
        bail!("digest mismatch: {} does not match {}", input.display(), hashes.display());
    }

    let opts = VerifyOptions { algorithm, encoding, recursive, strict };
    let report = verify_directory(input, hashes, &opts, None)?;

    let mut counts = [0usize; 5];
    for entry in report.entries() {
        let slot = match entry.status {
            VerifyStatus::Match => 0,
            VerifyStatus::Mismatch => 1,
            VerifyStatus::MissingFile => 2,
            VerifyStatus::ExtraFile => 3,
            VerifyStatus::IoError => 4,
        };
        counts[slot] += 1;
        if entry.status != VerifyStatus::Match {
            println!("{}: {}", entry.status, entry.rel_path);
        }
    }
    println!(
        "checked {}: {} ok, {} mismatched, {} missing, {} extra, {} unreadable",
        report.entries().len(),
        counts[0],
        counts[1],
        counts[2],
        counts[3],
        counts[4]
    );

    if let Some(path) = report_path {
        std::fs::write(&path, report.to_xml())
            .with_context(|| format!("write {}", path.display()))?;
        println!("report -> {}", path.display());
    }

    if report.has_errors() {
        bail!("verification failed");
    }
    println!("OK");
    Ok(())
}

fn build_globset(includes: &[String], excludes: &[String]) -> Result<(GlobSet, GlobSet)> {
    let mut incb = GlobSetBuilder::new();
    let mut excb = GlobSetBuilder::new();
    if includes.is_empty() {
        incb.add(Glob::new("**/*")?);
    }
    for g in includes {
        incb.add(Glob::new(g)?);
    }
    for g in excludes {
        excb.add(Glob::new(g)?);
    }
    Ok((incb.build()?, excb.build()?))
}
