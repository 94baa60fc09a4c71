use serde::Serialize;

use tickmatch_core::{CompanyRecord, DisambiguatorBuilder, MatchStage, ProviderAttempt, Resolution};

use crate::cli::ResolveArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ResolveEntry<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a CompanyRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain: Option<Explain<'a>>,
}

#[derive(Debug, Serialize)]
struct Explain<'a> {
    stage: Option<MatchStage>,
    score: Option<u8>,
    attempts: &'a [ProviderAttempt],
}

pub async fn run(
    args: &ResolveArgs,
    builder: DisambiguatorBuilder,
) -> Result<CommandResult, CliError> {
    let disambiguator = builder.build()?;
    tracing::debug!(
        inputs = args.inputs.len(),
        threshold = disambiguator.threshold(),
        "resolving inputs"
    );

    let mut resolutions = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        resolutions.push(disambiguator.resolve(input).await);
    }

    let unresolved = resolutions
        .iter()
        .filter(|resolution| !resolution.is_resolved())
        .count();
    let entries = resolutions
        .iter()
        .map(|resolution| entry(resolution, args.explain))
        .collect::<Vec<_>>();

    let data = serde_json::to_value(entries)?;
    Ok(CommandResult::ok(data).with_unresolved(unresolved))
}

fn entry(resolution: &Resolution, explain: bool) -> ResolveEntry<'_> {
    let (record, error) = match &resolution.outcome {
        Ok(record) => (Some(record), None),
        Err(error) => (None, Some(error.to_string())),
    };

    ResolveEntry {
        input: &resolution.input,
        record,
        error,
        explain: explain.then(|| Explain {
            stage: resolution.stage,
            score: resolution.score,
            attempts: &resolution.attempts,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tickmatch_core::{DisambiguationError, Ticker};

    fn resolution(outcome: Result<CompanyRecord, DisambiguationError>) -> Resolution {
        let stage = outcome.is_ok().then_some(MatchStage::Unstructured);
        Resolution {
            input: String::from("Tesla"),
            outcome,
            stage,
            score: Some(100),
            attempts: Vec::new(),
        }
    }

    #[test]
    fn resolved_entry_carries_record() {
        let record = CompanyRecord::new(
            Some(String::from("Tesla Inc.")),
            Ticker::parse("TSLA").expect("valid"),
            "NASDAQ",
            None,
        )
        .expect("valid record");
        let resolution = resolution(Ok(record));

        let value = serde_json::to_value(entry(&resolution, false)).expect("serializes");
        assert_eq!(
            value,
            json!({
                "input": "Tesla",
                "record": {"company_name": "Tesla Inc.", "ticker": "TSLA", "exchange": "NASDAQ"}
            })
        );
    }

    #[test]
    fn unresolved_entry_carries_reason_and_explain() {
        let resolution = resolution(Err(DisambiguationError::no_match()));

        let value = serde_json::to_value(entry(&resolution, true)).expect("serializes");
        assert_eq!(
            value,
            json!({
                "input": "Tesla",
                "error": "No matching company found",
                "explain": {"stage": null, "score": 100, "attempts": []}
            })
        );
    }
}
