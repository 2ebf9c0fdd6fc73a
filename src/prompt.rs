//! Evaluation prompt construction.
//!
//! The prompt has two parts: a fixed instruction template (the VC
//! evaluation rubric plus the required JSON output shape) and the deck
//! content rendered from the section map. They are joined by a literal
//! `--- PITCH DECK CONTENT ---` separator line so the model can tell
//! instructions from material.
//!
//! Section rendering is deterministic: sections appear in first-seen
//! document order, each as a `###` heading (key upper-cased, underscores
//! back to spaces) followed by its body.

use crate::segment::SectionMap;

/// Separator between instructions and deck content.
const CONTENT_SEPARATOR: &str = "--- PITCH DECK CONTENT ---";

/// The built-in evaluation instruction template.
///
/// The OUTPUT FORMAT block doubles as the schema contract: the reply
/// parser in [`crate::response`] accepts exactly this shape (plus a legacy
/// `{rating, feedback}` fallback).
pub const EVALUATION_PROMPT: &str = r##"You are a senior venture capital partner with 15+ years of experience evaluating startup pitch decks. You've seen over 10,000 pitches and invested in 200+ companies, with notable exits including several unicorns.

EVALUATION FRAMEWORK:
Rate each section individually (1-10), then provide an overall rating based on weighted averages:

SECTION WEIGHTS & CRITERIA:
1. Problem/Market Opportunity (20%):
   - Is the problem significant, urgent, and widespread?
   - Market size validation and growth potential
   - Personal connection/pain point demonstration

2. Solution & Product (18%):
   - Clarity and uniqueness of the solution
   - Product-market fit evidence
   - Technical feasibility and innovation level

3. Business Model & Revenue (15%):
   - Revenue model clarity and scalability
   - Unit economics and path to profitability
   - Multiple revenue streams potential

4. Market Analysis & Competition (12%):
   - TAM/SAM/SOM breakdown with sources
   - Competitive landscape understanding
   - Differentiation and competitive advantages

5. Traction & Validation (15%):
   - Customer acquisition and retention metrics
   - Revenue growth and key milestones
   - Market validation evidence (LOIs, pilots, etc.)

6. Team & Execution (10%):
   - Founder-market fit and relevant experience
   - Team completeness and skill gaps
   - Previous startup/industry experience

7. Financial Projections (5%):
   - Realistic assumptions and growth projections
   - Key metrics and unit economics
   - Funding requirements justification

8. Go-to-Market Strategy (3%):
   - Customer acquisition strategy
   - Sales and marketing channels
   - Partnership and distribution plans

9. Investment Ask & Use of Funds (2%):
   - Clear funding requirements
   - Specific allocation of funds
   - Milestones and timeline

RATING SCALE:
- 9-10: Exceptional - Top 5% of pitches, immediate investment consideration
- 7-8: Strong - Well-executed with minor gaps, worth deeper discussion
- 5-6: Average - Has potential but needs significant improvements
- 3-4: Weak - Major flaws or missing critical elements
- 1-2: Poor - Not investment ready, fundamental issues

ANALYSIS REQUIREMENTS:
- Be brutally honest but constructive
- Compare against industry benchmarks
- Identify 3 biggest strengths and 3 biggest weaknesses
- Suggest specific, actionable improvements
- Consider stage-appropriate expectations (pre-seed vs Series A)
- Flag any red flags or concerning elements

IMPORTANT: Respond with VALID JSON only. No markdown, no backticks, no additional text. Start directly with { and end with }.

OUTPUT FORMAT:
{
  "overall_rating": 6.8,
  "stage_assessment": "Seed-stage startup",
  "investment_readiness": "Needs 2-3 months of improvements before investor meetings",
  "section_ratings": {
    "problem_market": { "score": 7, "weight": 20 },
    "solution_product": { "score": 6, "weight": 18 },
    "business_model": { "score": 5, "weight": 15 },
    "market_analysis": { "score": 8, "weight": 12 },
    "traction": { "score": 4, "weight": 15 },
    "team": { "score": 7, "weight": 10 },
    "financials": { "score": 6, "weight": 5 },
    "go_to_market": { "score": 5, "weight": 3 },
    "funding_ask": { "score": 7, "weight": 2 }
  },
  "detailed_feedback": {
    "strengths": [
      "Strong market opportunity with $50B TAM and 25% CAGR",
      "Experienced founding team with 2 previous exits",
      "Clear competitive differentiation through proprietary technology"
    ],
    "critical_weaknesses": [
      "No customer traction or revenue despite 18 months of development",
      "Business model lacks clarity on customer acquisition costs",
      "Financial projections seem overly optimistic without supporting data"
    ],
    "section_feedback": {
      "problem_market": "Well-articulated problem with strong market research.",
      "solution_product": "Solution is clear but needs more technical depth.",
      "business_model": "Revenue model is mentioned but lacks detail.",
      "market_analysis": "Excellent market research with credible sources.",
      "traction": "Need concrete metrics: users, revenue, partnerships.",
      "team": "Strong technical team but missing sales/marketing expertise.",
      "financials": "Projections lack supporting assumptions.",
      "go_to_market": "Generic approach without channel-specific strategies.",
      "funding_ask": "Clear ask but tie funding milestones to metrics."
    }
  },
  "next_steps": [
    "Focus on customer development and early traction in next 90 days",
    "Refine business model with clear unit economics",
    "Add business development expertise to team or advisory board"
  ],
  "comparable_companies": [
    "Similar to early-stage [Company X] but lacks their customer validation",
    "Technical approach reminiscent of [Company Y] with better market positioning"
  ],
  "risk_assessment": {
    "execution_risk": "High",
    "market_risk": "Medium",
    "team_risk": "Low",
    "technology_risk": "Medium"
  }
}"##;

/// Render the section map as prompt-ready deck content.
///
/// Each section becomes `### KEY` (upper-cased, `_` → space) followed by
/// its body; sections are separated by blank lines and kept in document
/// order.
pub fn render_sections(sections: &SectionMap) -> String {
    sections
        .iter()
        .map(|(key, body)| format!("### {}\n{}", key.replace('_', " ").to_uppercase(), body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Assemble the full prompt: instruction template, separator, deck content.
///
/// `template_override` replaces the built-in instruction template wholesale;
/// the separator and rendered sections are always appended after it.
pub fn build_prompt(sections: &SectionMap, template_override: Option<&str>) -> String {
    let template = template_override.unwrap_or(EVALUATION_PROMPT);
    format!(
        "{template}\n\n{CONTENT_SEPARATOR}\n\n{}\n",
        render_sections(sections)
    )
}
