//! artmark artworks command implementation

use crate::codec;
use crate::error::Result;
use crate::ids::ArtworkId;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session::AgendaEntry;

use super::Context;

#[derive(serde::Serialize)]
struct ArtworkListOutput {
    total: usize,
    artwork_ids: Vec<ArtworkId>,
}

#[derive(serde::Serialize)]
struct ArtworkIdsOutput {
    ids: String,
}

#[derive(serde::Serialize)]
struct AgendaOutput {
    total: usize,
    artworks: Vec<AgendaEntry>,
}

pub async fn run(ctx: &Context, open: bool, ids: bool) -> Result<()> {
    let options = OutputOptions {
        json: ctx.json,
        quiet: ctx.quiet,
    };

    if open {
        let agenda = ctx.session.open_agenda().await?;
        let mut human = HumanOutput::new("Open tasks");
        human.push_summary("Artworks", agenda.len().to_string());
        for entry in &agenda {
            for task in &entry.tasks {
                human.push_detail(format!(
                    "{}  {}  {}  {}",
                    entry.artwork_id,
                    task.id(),
                    task.record.due_date,
                    task.record.text
                ));
            }
        }
        return emit_success(
            options,
            "artworks",
            &AgendaOutput {
                total: agenda.len(),
                artworks: agenda,
            },
            Some(&human),
        );
    }

    let artwork_ids = ctx.session.artwork_ids_with_tasks().await.unwrap_or_default();

    if ids {
        let joined = codec::encode_ids(&artwork_ids);
        let human = HumanOutput::new(joined.clone());
        return emit_success(options, "artworks", &ArtworkIdsOutput { ids: joined }, Some(&human));
    }

    let mut human = HumanOutput::new("Artworks with tasks");
    human.push_summary("Total", artwork_ids.len().to_string());
    for id in &artwork_ids {
        human.push_detail(id.to_string());
    }
    if artwork_ids.is_empty() {
        human.push_next_step("artmark task add <artwork> <text> --due <when>");
    }

    emit_success(
        options,
        "artworks",
        &ArtworkListOutput {
            total: artwork_ids.len(),
            artwork_ids,
        },
        Some(&human),
    )
}
