use serde::Serialize;

use tickmatch_core::{DisambiguatorBuilder, ProviderId};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ProviderInfo {
    id: ProviderId,
    requires_api_key: bool,
}

#[derive(Debug, Serialize)]
struct ProvidersResponseData {
    supported: Vec<ProviderInfo>,
    chain: Vec<ProviderId>,
}

pub fn run(builder: DisambiguatorBuilder) -> Result<CommandResult, CliError> {
    let chain = builder.provider_ids()?;
    let supported = ProviderId::ALL
        .into_iter()
        .map(|id| ProviderInfo {
            id,
            requires_api_key: id.requires_api_key(),
        })
        .collect::<Vec<_>>();

    let data = serde_json::to_value(ProvidersResponseData { supported, chain })?;
    Ok(CommandResult::ok(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_configured_chain() {
        let builder = DisambiguatorBuilder::new()
            .with_primary_provider("yahoo")
            .with_fallback_providers(["catalog"]);

        let result = run(builder).expect("valid configuration");
        assert_eq!(result.data["chain"], json!(["yahoo", "catalog"]));
        assert_eq!(result.data["supported"][0], json!({"id": "alphavantage", "requires_api_key": true}));
        assert_eq!(result.unresolved, 0);
    }

    #[test]
    fn unknown_provider_is_config_error() {
        let builder = DisambiguatorBuilder::new().with_primary_provider("polygon");

        let error = run(builder).err().expect("must fail");
        assert_eq!(error.exit_code(), 2);
    }
}
