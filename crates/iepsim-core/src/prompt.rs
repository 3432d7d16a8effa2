use crate::model::{SchoolResponseRequest, ScoreOutcomesRequest};
use serde_json::Value;

/// Prompt templates rendered for the completion provider. Caller input is
/// interpolated verbatim: no escaping, truncation, or validation. Adversarial
/// or oversized input is the provider's problem, not ours.

fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn render_list(values: &[Value]) -> String {
    render(&Value::Array(values.to_vec()))
}

pub fn school_response_prompt(req: &SchoolResponseRequest) -> String {
    format!(
        r#"You are simulating an IEP scenario between a parent and a school.
Given the scenario background, the last school line, and the parent/school history, generate the school's next response and 2-4 possible parent responses (with IRP type and a brief explanation for each).

Respond in JSON format:
{{
  "schoolResponse": "<school's reply>",
  "options": [
    {{ "type": "<interests|rights|power>", "text": "<parent response>", "textExplanation": "<brief explanation>" }},
    ...
  ]
}}

Ensure the JSON is valid and well-formed. Only output valid JSON.

Scenario background: {background}
Last school line: {school_line}
Parent/school history: {history}
Parent IRP type: {irp_type}
{irp_context}"#,
        background = req.scenario_background,
        school_line = req.school_line,
        history = render_list(&req.parent_history),
        irp_type = req.irp_type,
        irp_context = irp_context(&req.irp_type),
    )
}

pub fn score_outcomes_prompt(req: &ScoreOutcomesRequest) -> String {
    format!(
        r#"You are an expert in special education advocacy. Given the possible outcomes and the last parent/school exchange, score the likelihood (0-100) of each outcome and provide a brief explanation.

Respond in JSON format:
[
  {{ "outcome": "<outcome>", "score": <number>, "explanation": "<reason>" }},
  ...
]

Only output valid JSON.

Possible outcomes: {outcomes}
Last exchange: {exchange}
Previous scores: {scores}"#,
        outcomes = render_list(&req.potential_outcomes),
        exchange = render(&req.last_exchange),
        scores = render_list(&req.previous_scores),
    )
}

/// One line of framing per IRP stance. Unknown labels get no framing rather
/// than an error; the label itself is still echoed into the prompt above.
fn irp_context(irp_type: &str) -> &'static str {
    match irp_type {
        "interests" => {
            "IRP context: The parent is focusing on interests: shared goals, collaboration, and mutual benefit."
        }
        "rights" => {
            "IRP context: The parent is focusing on rights: legal entitlements, policies, and rules."
        }
        "power" => {
            "IRP context: The parent is focusing on power: authority, leverage, or demands."
        }
        _ => "",
    }
}
