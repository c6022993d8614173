//! Built-in document-generation template.
//!
//! Section order: style, audience, topic, requirements, formatting,
//! anti-pattern guidance, closing instruction.

/// Markdown conventions the generated document must follow.
pub const FORMAT_INSTRUCTIONS: &str = "FORMAT: Use Markdown formatting:
- Use # for the main title (only once at the beginning)
- Use ## for major section headings
- Use ### for subsection headings
- Use **bold** for emphasis (sparingly)
- Use *italic* for subtle emphasis (sparingly)
- Use bullet points with - or *
- Use numbered lists with 1., 2., 3.";

/// Stylistic directives steering the model away from boilerplate prose.
pub const ANTI_PATTERN_INSTRUCTIONS: &str = "ANTI-AI-PATTERN INSTRUCTIONS (CRITICAL):
Write like a human, not an AI. Specifically avoid these common AI patterns:

❌ AVOID:
- Generic openings (\"In today's world...\", \"In an era of...\", \"As we navigate...\")
- Excessive hedging language (\"may,\" \"might,\" \"could potentially,\" \"arguably\")
- Formulaic transitions (\"Moreover,\" \"Furthermore,\" \"Additionally,\" \"In conclusion\")
- Overly enthusiastic or promotional tone
- Lists of abstract concepts without concrete examples
- Perfectly balanced arguments (real writing has a point of view)
- Explaining what you're about to do (\"Let's explore...\", \"We will examine...\")
- Meta-commentary about the document itself

✓ INSTEAD:
- Start directly with substance or a specific observation
- Make clear, confident statements when appropriate
- Use natural transitions that flow from ideas
- Vary sentence structure organically (mix short and long)
- Include specific examples, anecdotes, or concrete details
- Write with authentic voice and clear perspective
- Let ideas connect naturally without announcing connections";

/// The default Handlebars template.
///
/// `formatInstructions` and `antiPatternInstructions` are injected by the
/// builder; the remaining variables come from the generation request.
pub const DEFAULT_TEMPLATE: &str = "You are a professional content writer tasked with creating a {{outputType}}.

WRITING STYLE & VOICE:
{{style}}

CRITICAL: Deeply analyze the writing style above. Pay close attention to:
- Sentence structure patterns and rhythm
- Word choice and vocabulary level
- Tone and personality quirks
- How ideas are introduced and developed
- Paragraph structure and flow
- Use of examples, metaphors, or analogies
- Any unique stylistic signatures

Mirror these patterns authentically in your writing.

TARGET AUDIENCE:
{{audience}}

TOPIC, INSIGHTS & QUOTES:
{{topic}}

DOCUMENT REQUIREMENTS:
- Type: {{outputType}}
- Length: {{size}}
- Audience: {{audience}}

{{formatInstructions}}

{{antiPatternInstructions}}

Generate a complete, well-structured {{outputType}} that:
1. DEEPLY matches the provided writing style and voice (analyze it carefully first)
2. Is tailored to the target audience ({{audience}})
3. Incorporates the topic, insights, and quotes provided naturally
4. Meets the length requirement ({{size}})
5. Sounds like authentic human writing, not AI-generated content
6. Is professionally formatted and ready for publication

Generate the complete document now:";
