use anyhow::{Context, Result};
use tabmap_core::{FileSessionStore, SessionStore, mapping_from_suggestions};
use tabmap_map::MappingEngine;
use tabmap_validate::ReportOptions;
use tracing::{info, warn};

use tabmap_cli::pipeline::{
    CliImporter, MappingSource, default_output_dir, ingest, load_schema, output, output_stem,
    process, resolve_mapping, select_session_schema, start_session, write_mapping_file,
};

use crate::cli::{
    CheckArgs, MappingSourceArgs, PreviewArgs, ProcessArgs, SchemaArgs, SessionDirArgs,
    SessionIdArgs, SessionMapArgs, SessionSchemaArgs, SessionStartArgs, SuggestArgs,
};
use crate::summary::{
    print_preview, print_process_summary, print_report, print_schema, print_schemas,
    print_session, print_sessions, print_suggestions,
};
use crate::types::ProcessResult;

pub fn run_schemas(importer: &CliImporter) -> Result<()> {
    let schemas = importer.list_schemas().context("list schemas")?;
    print_schemas(&schemas);
    Ok(())
}

pub fn run_schema(importer: &CliImporter, args: &SchemaArgs) -> Result<()> {
    let schema = load_schema(importer, &args.name)?;
    print_schema(&schema);
    Ok(())
}

pub fn run_preview(importer: &CliImporter, args: &PreviewArgs) -> Result<()> {
    let table = importer
        .preview(&args.file, args.rows)
        .with_context(|| format!("preview {}", args.file.display()))?;
    print_preview(&table);
    Ok(())
}

pub fn run_suggest(importer: &CliImporter, args: &SuggestArgs) -> Result<()> {
    let schema = load_schema(importer, &args.schema)?;
    let table = ingest(importer, &args.file)?;
    let suggestions = importer.suggest(&table, &schema);

    let alternatives = args.alternatives.map(|limit| {
        let engine = MappingEngine::new(&schema);
        table
            .headers
            .iter()
            .map(|column| (column.clone(), engine.rank_fields(column, limit)))
            .collect::<Vec<_>>()
    });
    print_suggestions(&suggestions, alternatives.as_deref());

    if let Some(path) = &args.output {
        write_mapping_file(path, &mapping_from_suggestions(&suggestions))?;
        println!("Mapping written to {}", path.display());
    }
    Ok(())
}

pub fn run_check(importer: &CliImporter, args: &CheckArgs) -> Result<bool> {
    let schema = load_schema(importer, &args.schema)?;
    let table = ingest(importer, &args.file)?;
    let mapping = resolve_mapping(importer, &mapping_source(&args.source), &table, &schema)?;
    let report = importer.check(
        &table,
        &schema,
        &mapping,
        &ReportOptions {
            max_sample_rows: args.sample_rows,
        },
    );
    print_report(&report);
    Ok(report.is_valid())
}

pub fn run_process(importer: &CliImporter, args: &ProcessArgs) -> Result<ProcessResult> {
    let schema = load_schema(importer, &args.schema)?;
    let table = ingest(importer, &args.file)?;
    let mapping = resolve_mapping(importer, &mapping_source(&args.source), &table, &schema)?;
    let outcome = process(importer, &table, &schema, &mapping, args.parallel);

    let outputs = if args.dry_run {
        info!("dry run, no files written");
        None
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.file));
        Some(output(&dir, &output_stem(&args.file), &outcome)?)
    };

    Ok(ProcessResult {
        file: args.file.clone(),
        schema: schema.name,
        outcome,
        outputs,
    })
}

fn mapping_source(args: &MappingSourceArgs) -> MappingSource {
    match (&args.mapping, args.session) {
        (Some(path), _) => MappingSource::File(path.clone()),
        (None, Some(id)) => MappingSource::Session {
            dir: args.session_dir.clone(),
            id,
        },
        (None, None) => MappingSource::Suggested,
    }
}

// ============================================================================
// Sessions
// ============================================================================

fn open_store(args: &SessionDirArgs) -> Result<FileSessionStore> {
    FileSessionStore::new(&args.session_dir)
        .with_context(|| format!("open session store {}", args.session_dir.display()))
}

pub fn run_session_start(importer: &CliImporter, args: &SessionStartArgs) -> Result<()> {
    let session = start_session(importer, &args.file, args.schema.as_deref())?;
    open_store(&args.dir)?.save(&session).context("save session")?;
    println!("Session {}", session.id);
    print_session(&session);
    Ok(())
}

pub fn run_session_schema(importer: &CliImporter, args: &SessionSchemaArgs) -> Result<()> {
    let store = open_store(&args.dir)?;
    let session = select_session_schema(importer, &store, args.id, &args.schema)?;
    print_session(&session);
    Ok(())
}

pub fn run_session_map(importer: &CliImporter, args: &SessionMapArgs) -> Result<()> {
    let store = open_store(&args.dir)?;
    let mut session = store.get(args.id).context("load session")?;

    if let (Some(field), Some(schema_name)) = (&args.field, &session.target_schema) {
        let schema = load_schema(importer, schema_name)?;
        if !schema.contains_field(field) {
            warn!(field = %field, schema = %schema.name, "field is not in the session schema");
        }
    }
    session.update_mapping(&args.column, args.field.as_deref());
    store.save(&session).context("save session")?;
    print_session(&session);
    Ok(())
}

pub fn run_session_show(args: &SessionIdArgs) -> Result<()> {
    let session = open_store(&args.dir)?
        .get(args.id)
        .context("load session")?;
    print_session(&session);
    Ok(())
}

pub fn run_session_list(args: &SessionDirArgs) -> Result<()> {
    let sessions = open_store(args)?.list().context("list sessions")?;
    print_sessions(&sessions);
    Ok(())
}

pub fn run_session_delete(args: &SessionIdArgs) -> Result<()> {
    if open_store(&args.dir)?
        .delete(args.id)
        .context("delete session")?
    {
        println!("Deleted session {}", args.id);
    } else {
        println!("No session {}", args.id);
    }
    Ok(())
}
