// All LLM prompt templates for the cover letter pipeline.
// Values are substituted verbatim: no trimming, escaping, or length limits.

/// Draft prompt. Placeholders: `{resume}`, `{job_description}`.
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"
You are a professional career assistant.

Using the resume and job description below, write a clear, concise, and role-specific cover letter.
Avoid generic statements. Keep a professional tone.

Resume:
{resume}

Job Description:
{job_description}
"#;

/// Critique prompt. Placeholder: `{draft}`.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"
You are reviewing a draft cover letter.

Critique it based on:
1. Alignment with the job description
2. Use of resume-specific details
3. Generic or weak phrasing
4. Tone and clarity

Return a short critique only.

Draft:
{draft}
"#;

/// Revision prompt. Placeholders: `{draft}`, `{critique}`.
pub const REVISION_PROMPT_TEMPLATE: &str = r#"
Rewrite the cover letter using the critique below.
Make it more specific, impactful, and well-aligned with the job description.

Draft:
{draft}

Critique:
{critique}
"#;

pub fn draft_prompt(resume: &str, job_description: &str) -> String {
    fill_template(
        DRAFT_PROMPT_TEMPLATE,
        &[("resume", resume), ("job_description", job_description)],
    )
}

pub fn critique_prompt(draft: &str) -> String {
    fill_template(CRITIQUE_PROMPT_TEMPLATE, &[("draft", draft)])
}

pub fn revision_prompt(draft: &str, critique: &str) -> String {
    fill_template(
        REVISION_PROMPT_TEMPLATE,
        &[("draft", draft), ("critique", critique)],
    )
}

/// Single-pass `{name}` substitution.
///
/// Substituted values are never rescanned, so a resume that happens to contain
/// `{job_description}` is passed through as-is. Unknown placeholders are left alone.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let matched = values.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (value, after))
        });

        match matched {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_prompt_contains_both_inputs_verbatim() {
        let resume = "  Jane Doe\nRust engineer, 6 years  ";
        let jd = "Senior Backend Engineer — Payments";
        let prompt = draft_prompt(resume, jd);
        assert!(prompt.contains(resume));
        assert!(prompt.contains(jd));
        assert!(prompt.contains("You are a professional career assistant."));
        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_critique_prompt_lists_review_criteria() {
        let prompt = critique_prompt("Dear Hiring Manager, ...");
        assert!(prompt.contains("Dear Hiring Manager, ..."));
        assert!(prompt.contains("1. Alignment with the job description"));
        assert!(prompt.contains("4. Tone and clarity"));
        assert!(prompt.contains("Return a short critique only."));
    }

    #[test]
    fn test_revision_prompt_places_draft_before_critique() {
        let prompt = revision_prompt("THE DRAFT", "THE CRITIQUE");
        let draft_at = prompt.find("THE DRAFT").unwrap();
        let critique_at = prompt.find("THE CRITIQUE").unwrap();
        assert!(draft_at < critique_at);
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let prompt = draft_prompt("I write {job_description} parsers", "JD");
        assert!(prompt.contains("I write {job_description} parsers"));
    }

    #[test]
    fn test_unknown_braces_are_left_alone() {
        let filled = fill_template("a {x} {unknown} {", &[("x", "1")]);
        assert_eq!(filled, "a 1 {unknown} {");
    }

    #[test]
    fn test_empty_value_substitutes_to_nothing() {
        assert_eq!(fill_template("[{v}]", &[("v", "")]), "[]");
    }
}
