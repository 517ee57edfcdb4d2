use archsketch_core::PatternId;

pub fn system_prompt() -> String {
    let ids: Vec<&str> = PatternId::ALL.iter().map(|p| p.as_str()).collect();
    format!(
        "You are a cloud architecture assistant. Turn the user's description into an \
architecture diagram.\n\n\
Output ONLY one JSON object with this shape:\n\
{{\"diagram_type\":\"<pattern id>\",\"title\":\"...\",\"description\":\"...\",\
\"components\":[{{\"id\":\"snake_case_id\",\"name\":\"Display Name\",\"type\":\"<kind>\",\
\"technology\":\"...\",\"description\":\"...\",\"layer\":\"<tier>\",\"icon_category\":\"<icon>\"}}],\
\"connections\":[{{\"from\":\"<component id>\",\"to\":\"<component id>\",\"type\":\"<edge kind>\",\
\"label\":\"...\",\"protocol\":\"...\"}}],\"patterns\":[\"...\"]}}\n\n\
Rules:\n\
- diagram_type is one of: {}\n\
- type is a short tag such as network, subnet, gateway, loadbalancer, security, identity, \
webapp, api, function, compute, container, kubernetes, queue, database, cache, storage, \
analytics, monitoring, subscription, onprem, user\n\
- layer is one of: external, presentation, security, network, application, integration, \
data, analytics, infrastructure, management\n\
- connection type is one of: api_call, data_flow, security_flow, network_flow, peering, \
contains, vpn, auth, monitoring, message_flow\n\
- every connection endpoint must be the id of a listed component\n\
- name only services the description mentions or clearly implies; do not pad\n\
- omit positions, they are computed afterwards\n\n\
Output ONLY the JSON object, nothing else.",
        ids.join(", ")
    )
}

pub fn user_message(text: &str, requested: &str) -> String {
    let requested = requested.trim();
    if requested.is_empty() || requested.eq_ignore_ascii_case("auto") {
        format!("Description:\n{text}")
    } else {
        format!("Requested diagram type: {requested}\n\nDescription:\n{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_lists_every_pattern() {
        let prompt = system_prompt();
        for p in PatternId::ALL {
            assert!(prompt.contains(p.as_str()), "missing {p}");
        }
    }

    #[test]
    fn auto_hint_is_not_forwarded() {
        assert_eq!(user_message("three tier app", "auto"), "Description:\nthree tier app");
        assert!(user_message("x", "aws").starts_with("Requested diagram type: aws"));
    }
}
