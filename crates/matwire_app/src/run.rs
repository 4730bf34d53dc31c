// SPDX-License-Identifier: MIT OR Apache-2.0
//! Classification and synthesis runs driven by the command line.

use crate::cli::Cli;
use crate::scan;
use anyhow::{Context, Result};
use matwire_graph::graphs::redshift;
use matwire_graph::{Graph, NodeRegistry};
use matwire_texture::{Classifier, GraphHost, MatwireConfig, SynthesisReport, Synthesizer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn initialise_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("matwire_app=info,matwire_texture=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => MatwireConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => MatwireConfig::default(),
    };
    if let Some(projection) = cli.projection {
        config.projection = Some(projection.into());
    }

    let textures = scan::collect_textures(&cli.inputs);
    if textures.is_empty() {
        tracing::warn!("no texture files found");
    }

    let mut stdout = std::io::stdout().lock();

    if cli.classify_only {
        return write_classification(&mut stdout, &config.classifier(), &textures);
    }

    let registry = redshift::create_redshift_registry();
    let mut graph = match &cli.graph {
        Some(path) => load_graph(path)?,
        None => redshift::standard_material_graph(&registry, cli.material_name.as_str())
            .context("building a fresh material graph")?
            .0,
    };

    let report = synthesize(&mut graph, &registry, &config, &textures);
    print_warnings(&report);

    let text = ron::ser::to_string_pretty(&graph, ron::ser::PrettyConfig::default()).context("serializing graph")?;
    match cli.out.as_ref().or(cli.graph.as_ref()) {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing graph {}", path.display()))?;
            tracing::info!(path = %path.display(), "graph saved");
        }
        None => writeln!(stdout, "{text}")?,
    }

    Ok(())
}

/// Run a synthesis batch over `graph`
pub fn synthesize(
    graph: &mut Graph,
    registry: &NodeRegistry,
    config: &MatwireConfig,
    textures: &[PathBuf],
) -> SynthesisReport {
    let mut host = GraphHost::new(graph, registry);
    Synthesizer::from_config(config).run(&mut host, textures)
}

fn load_graph(path: &Path) -> Result<Graph> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading graph {}", path.display()))?;
    let graph: Graph = ron::from_str(&text).with_context(|| format!("parsing graph {}", path.display()))?;
    tracing::debug!(path = %path.display(), nodes = graph.node_count(), "loaded graph");
    Ok(graph)
}

fn write_classification(out: &mut impl Write, classifier: &Classifier, textures: &[PathBuf]) -> Result<()> {
    for path in textures {
        let texture = classifier.classify_path(path);
        match texture.channel {
            Some(channel) => writeln!(out, "{} -> {channel}", path.display())?,
            None => writeln!(out, "{} -> (none)", path.display())?,
        }
    }
    Ok(())
}

fn print_warnings(report: &SynthesisReport) {
    for (path, warning) in report.warnings() {
        eprintln!("warning: {}: {warning}", path.display());
    }
    for texture in report.unclassified() {
        eprintln!("note: {}: no channel matched; sampler left unwired", texture.path.display());
    }
    eprintln!(
        "{} of {} textures wired",
        report.wired_count(),
        report.textures.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProjectionArg;
    use matwire_graph::graphs::redshift::{standard_material, texture_sampler, triplanar};

    fn cli(inputs: Vec<PathBuf>) -> Cli {
        Cli {
            inputs,
            config: None,
            graph: None,
            out: None,
            projection: None,
            classify_only: false,
            material_name: "Material".to_string(),
        }
    }

    #[test]
    fn classification_lines() {
        let mut out = Vec::new();
        let textures = [PathBuf::from("rock_albedo.png"), PathBuf::from("noise.png")];
        write_classification(&mut out, &Classifier::default(), &textures).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rock_albedo.png -> base_color\nnoise.png -> (none)\n"
        );
    }

    #[test]
    fn writes_fresh_graph_to_out() {
        let dir = tempfile::tempdir().unwrap();
        let textures = dir.path().join("textures");
        std::fs::create_dir(&textures).unwrap();
        std::fs::write(textures.join("rock_albedo.png"), b"").unwrap();
        std::fs::write(textures.join("rock_roughness.png"), b"").unwrap();
        let out = dir.path().join("rock.ron");

        run(Cli {
            out: Some(out.clone()),
            projection: Some(ProjectionArg::Triplanar),
            ..cli(vec![textures])
        })
        .unwrap();

        let graph: Graph = ron::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(graph.nodes_of_type(texture_sampler::ID).count(), 2);
        assert_eq!(graph.nodes_of_type(triplanar::ID).count(), 2);
        assert_eq!(graph.nodes_of_type(standard_material::ID).count(), 1);
    }

    #[test]
    fn rewiring_a_saved_graph_stays_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let texture = dir.path().join("rock_albedo.png");
        std::fs::write(&texture, b"").unwrap();
        let saved = dir.path().join("rock.ron");

        run(Cli {
            out: Some(saved.clone()),
            ..cli(vec![texture.clone()])
        })
        .unwrap();
        run(Cli {
            graph: Some(saved.clone()),
            ..cli(vec![texture])
        })
        .unwrap();

        let graph: Graph = ron::from_str(&std::fs::read_to_string(&saved).unwrap()).unwrap();
        let material = graph.nodes_of_type(standard_material::ID).next().unwrap();
        let base_color = material.find_input(&[standard_material::BASE_COLOR]).unwrap().id;
        assert_eq!(graph.nodes_of_type(texture_sampler::ID).count(), 2);
        assert_eq!(graph.connections_to(base_color).count(), 1);
    }

    #[test]
    fn last_named_texture_wins_its_channel() {
        let dir = tempfile::tempdir().unwrap();
        let diffuse = dir.path().join("rock_diffuse.png");
        let albedo = dir.path().join("rock_albedo.png");
        std::fs::write(&diffuse, b"").unwrap();
        std::fs::write(&albedo, b"").unwrap();
        let out = dir.path().join("rock.ron");

        run(Cli {
            out: Some(out.clone()),
            ..cli(vec![diffuse, albedo.clone()])
        })
        .unwrap();

        let graph: Graph = ron::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let material = graph.nodes_of_type(standard_material::ID).next().unwrap();
        let base_color = material.find_input(&[standard_material::BASE_COLOR]).unwrap().id;
        let source = graph.connections_to(base_color).next().unwrap().from_node;
        let path_port = graph
            .node(source)
            .and_then(|n| n.find_input(&[texture_sampler::TEX0, texture_sampler::PATH]))
            .unwrap()
            .id;
        assert_eq!(
            graph.port_value(path_port),
            Some(&matwire_graph::PortValue::String(albedo.to_string_lossy().into_owned()))
        );
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = run(Cli {
            config: Some(PathBuf::from("/no/such/matwire.ron")),
            ..cli(vec![PathBuf::from("a.png")])
        })
        .unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }
}
