use anyhow::Context;
use clap::Parser;
use std::path::Path;
use visual_diff::{cli, compose, config, drag, probe, report};
use visual_diff_common::{is_stacked_layout, orientation_for, parse_batch};
use cli::{Cli, Commands, OutputFormat};
use compose::{ComposeRequest, ImageSource};
use config::Config;

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn read_batch(input: &Path) -> anyhow::Result<visual_diff_common::DiffsJson> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("一括比較JSONを読み込めません: {}", input.display()))?;
    let batch = parse_batch(&content)
        .with_context(|| format!("一括比較JSONが不正です: {}", input.display()))?;
    Ok(batch)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Compose { first, second, mode, opacity, position, batch, screen, issue, format, no_scale } => {
            let source = match batch {
                Some(path) => ImageSource::Batch { path, screen, issue },
                None => ImageSource::Files { first, second },
            };
            let request = ComposeRequest {
                source,
                mode,
                opacity,
                position,
                scale_highlights: no_scale.then_some(false),
            };
            let output = compose::compose(&request, &config)?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    if let Some(screen) = &output.screen {
                        println!("画面: {}", screen);
                    }
                    if let Some(index) = output.selected_issue {
                        println!("選択中の差分: #{}", index);
                    }
                    println!("{}", report::render_frame(&output.frame));
                }
            }
        }

        Commands::Layout { first, second } => {
            let first = probe::load_image_ref(&first)?;
            let second = probe::load_image_ref(&second)?;
            let stacked = is_stacked_layout(first.dimensions(), second.dimensions());

            println!("{}", orientation_for(Some(&first), Some(&second)).as_str());
            log::debug!(
                "{}: {:?}, {}: {:?}, stacked={}",
                first.display_name,
                first.dimensions(),
                second.display_name,
                second.dimensions(),
                stacked
            );
        }

        Commands::Swipe { container_left, container_width, pointer_x } => {
            let positions = drag::simulate_drag(container_left, container_width, &pointer_x);
            for (x, position) in pointer_x.iter().zip(&positions) {
                println!("{:>8.1} → {:>5.1}%", x, position.percent());
            }
        }

        Commands::Validate { input } => {
            let batch = read_batch(&input)?;
            println!("✔ {}画面 / {}件の差分", batch.screens.len(), batch.issue_count());
            for screen in &batch.screens {
                println!(
                    "  {} ({}) - {}件 (ハイライト可能: {}件)",
                    screen.screen_name,
                    screen.id,
                    screen.issues.len(),
                    screen.selectable_issue_count()
                );
            }
        }

        Commands::Issues { input, screen, lang } => {
            let batch = read_batch(&input)?;
            let language = lang.unwrap_or(config.language);

            match screen {
                Some(id) => {
                    let screen = batch
                        .screen(&id)
                        .ok_or_else(|| visual_diff_common::Error::ScreenNotFound(id.clone()))?;
                    println!("{}", report::render_screen_issues(screen, language));
                }
                None => {
                    for screen in &batch.screens {
                        println!("{}\n", report::render_screen_issues(screen, language));
                    }
                }
            }
        }

        Commands::Config { set_mode, set_opacity, set_language, show } => {
            let mut changed = false;
            if let Some(mode) = set_mode {
                config.set_mode(&mode)?;
                println!("✔ 既定モードを設定しました: {}", config.mode());
                changed = true;
            }
            if let Some(opacity) = set_opacity {
                config.set_opacity(opacity)?;
                println!("✔ 不透明度を設定しました: {}%", opacity);
                changed = true;
            }
            if let Some(language) = set_language {
                config.language = language;
                println!("✔ 言語を設定しました: {}", language);
                changed = true;
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  既定モード: {}", config.mode().label());
                println!("  オーバーレイ不透明度: {}%", config.opacity().percent());
                println!("  言語: {}", config.language);
                println!("  ハイライト拡縮: {}", if config.scale_highlights { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}
