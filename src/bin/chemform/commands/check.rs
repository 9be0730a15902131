use anyhow::Result;

use crate::cli::CheckArgs;
use crate::config::{build_element_filter, build_parser};
use crate::display::{Context, Progress, print_run_summary, print_skipped};
use crate::io::{CheckRecord, write_checks};

use super::{TOTAL_STEPS, load_formulas, parse_all, source_substep, write_output};

pub fn run_check(args: CheckArgs, ctx: Context) -> Result<()> {
    let parser = build_parser(&args.limits)?;
    let filter = build_element_filter(&args.filter, &parser)?;
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading formulas");
    let entries = load_formulas(&args.io)?;
    progress.complete_step(
        "Reading formulas",
        &[source_substep(&args.io, entries.len())],
    );

    progress.step_over("Checking elements", entries.len());
    let batch = parse_all(entries, args.io.keep_going, |text| {
        progress.tick();
        filter.check(&parser, text)
    })?;
    let mut substeps = batch.substeps("checked");
    substeps.insert(0, format!("Accept {}", filter.allowed.join(", ")));
    if filter.neutral_only {
        substeps.insert(1, "Reject charged species".to_string());
    }
    progress.complete_step("Checking elements", &substeps);

    let records: Vec<CheckRecord> = batch.parsed.into_iter().map(|(_, r)| r).collect();

    if ctx.interactive {
        let accepted = records.iter().filter(|r| r.accepted).count();
        print_run_summary(
            "Check Summary",
            &[
                ("Accepted", accepted.to_string()),
                ("Rejected", (records.len() - accepted).to_string()),
                ("Skipped", batch.failed.len().to_string()),
            ],
        );
    }

    progress.step("Writing output");
    let written = write_output(&args.io, |out| {
        write_checks(out, &records, args.io.format, args.filter.verdict)
    })?;
    progress.complete_step("Writing output", &[written]);

    print_skipped(&batch.failed);
    progress.finish("Check complete");

    Ok(())
}
