// Pipeline Orchestrator: analysis → revision → change documentation.
// Stages run strictly in order; each feeds the next. All LLM calls go through
// the TextGenerator seam; no direct provider calls here.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
