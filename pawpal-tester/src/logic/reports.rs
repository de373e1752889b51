use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

const CSV_HEADER: &str = "scenario,seed,species,name,policy,ticks,hunger,happiness,energy,state,age_days,achievements,refusals,saves,passed";

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Pet Simulation Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=========================".cyan())?;

    let (total, passed, failed) = tally(results);
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, total))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if let Some(last) = result.runs.last() {
            writeln!(
                out,
                "   Last run: {} the {} | {} | age {}d | {} achievements",
                last.name, last.species, last.state, last.age_days, last.achievements
            )?;
        }
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Pawpal Simulation Results\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let (total, passed, failed) = tally(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {failed}")?;
    writeln!(
        out,
        "- **Success rate**: {:.1}%\n",
        success_rate(passed, total)
    )?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "### {} {} (seed {})\n",
            status, result.scenario_name, result.seed
        )?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for run in results.iter().flat_map(|r| &r.runs) {
        writeln!(
            out,
            "{},{},{},{},{},{},{:.2},{:.2},{:.2},{},{},{},{},{},{}",
            csv_field(&run.scenario),
            run.seed,
            run.species,
            csv_field(&run.name),
            run.policy,
            run.ticks,
            run.hunger,
            run.happiness,
            run.energy,
            run.state,
            run.age_days,
            run.achievements,
            run.refusals,
            run.saves,
            run.passed
        )?;
    }
    Ok(())
}

fn tally(results: &[ScenarioResult]) -> (usize, usize, usize) {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    (total, passed, total - passed)
}

fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let passed = u32::try_from(passed).unwrap_or(u32::MAX);
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    f64::from(passed) / f64::from(total) * 100.0
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::RunRecord;

    fn sample() -> ScenarioResult {
        ScenarioResult {
            scenario_name: "Smoke Test".to_string(),
            seed: 42,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(3),
            runs: vec![RunRecord {
                scenario: "Smoke Test".to_string(),
                seed: 42,
                species: "cat".to_string(),
                name: "Mochi, Jr.".to_string(),
                policy: "caretaker".to_string(),
                ticks: 120,
                hunger: 41.5,
                happiness: 66.0,
                energy: 58.25,
                state: "normal".to_string(),
                age_days: 0,
                achievements: 0,
                refusals: 0,
                saves: 125,
                passed: true,
            }],
        }
    }

    #[test]
    fn csv_quotes_names_with_commas() {
        let mut buf = Vec::new();
        generate_csv_report(&mut buf, &[sample()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("Smoke Test,42,cat,\"Mochi, Jr.\",caretaker,120,41.50,66.00,58.25,normal,0,0,0,125,true")
        );
    }

    #[test]
    fn markdown_and_json_include_results() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Pawpal Simulation Results"));
        assert!(text.contains("### ✅ Smoke Test (seed 42)"));

        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample()]).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0].runs, sample().runs);
    }

    #[test]
    fn success_rate_handles_empty() {
        assert!((success_rate(0, 0) - 0.0).abs() < f64::EPSILON);
        assert!((success_rate(1, 4) - 25.0).abs() < f64::EPSILON);
    }
}
