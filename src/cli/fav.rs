//! artmark fav command implementation

use crate::error::Result;
use crate::ids::ArtworkId;
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::Context;

#[derive(serde::Serialize)]
struct FavouriteReport {
    artwork_id: ArtworkId,
    favourite: bool,
}

#[derive(serde::Serialize)]
struct FavouriteListReport {
    artwork_ids: Vec<ArtworkId>,
}

fn options(ctx: &Context) -> OutputOptions {
    OutputOptions {
        json: ctx.json,
        quiet: ctx.quiet,
    }
}

pub async fn run_show(ctx: &Context, artwork: ArtworkId) -> Result<()> {
    let favourite = ctx.session.is_favorite(&artwork).await;

    let header = if favourite {
        format!("artmark fav: {artwork} is a favourite")
    } else {
        format!("artmark fav: {artwork} is not a favourite")
    };
    let mut human = HumanOutput::new(header);
    human.push_next_step(format!("artmark fav toggle {artwork}"));

    emit_success(
        options(ctx),
        "fav show",
        &FavouriteReport {
            artwork_id: artwork,
            favourite,
        },
        Some(&human),
    )
}

pub async fn run_toggle(ctx: &Context, artwork: ArtworkId) -> Result<()> {
    let favourite = ctx.session.toggle_favorite(&artwork).await;

    let header = if favourite {
        format!("artmark fav toggle: {artwork} added")
    } else {
        format!("artmark fav toggle: {artwork} removed")
    };
    let human = HumanOutput::new(header);

    emit_success(
        options(ctx),
        "fav toggle",
        &FavouriteReport {
            artwork_id: artwork,
            favourite,
        },
        Some(&human),
    )
}

pub async fn run_list(ctx: &Context) -> Result<()> {
    let artwork_ids = ctx.session.favorites().await;

    let mut human = HumanOutput::new(format!("artmark fav list: {}", artwork_ids.len()));
    for id in &artwork_ids {
        human.push_detail(id.to_string());
    }
    if artwork_ids.is_empty() {
        human.push_next_step("artmark fav toggle <artwork>");
    }

    emit_success(
        options(ctx),
        "fav list",
        &FavouriteListReport { artwork_ids },
        Some(&human),
    )
}
