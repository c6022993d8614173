//! Document generation.
//!
//! Gathers the inputs (from flags, or interactively when no topic is given),
//! builds the prompt, calls the provider and saves the result locally or to
//! Google Docs/Drive.

use crate::console::Console;
use crate::output::{derive_title, document_name, file_name, save_local, OutputTarget};
use clap::Args;
use docgen_core::{config::AppConfig, AppError, AppResult};
use docgen_docs::{expand_home, is_hosted, looks_like_location, LazyStore, SourceReader};
use docgen_llm::{create_client, registry, LlmClient, ModelDescriptor};
use docgen_prompt::{build_prompt, load_prompt, GenerationRequest, DEFAULT_PROMPT_ID};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncBufRead;

/// Generation inputs; omit --topic to be asked for everything interactively
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Topic, insights and quotes: text, file path, or Google Docs/Drive link
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Writing style sample: text, file path, or Google Docs/Drive link
    #[arg(short, long)]
    pub style: Option<String>,

    /// Target audience
    #[arg(short, long)]
    pub audience: Option<String>,

    /// Output type (blog post, whitepaper, report, ...)
    #[arg(long = "type", value_name = "TYPE")]
    pub output_type: Option<String>,

    /// Document size (e.g. "3 pages", "1000 words")
    #[arg(long)]
    pub size: Option<String>,

    /// Output directory, Google Drive folder link, or "docs" for the Google Docs root
    #[arg(short, long, value_name = "LOCATION")]
    pub output: Option<String>,

    /// Upload to Drive as a Markdown file instead of creating a Google Doc
    #[arg(long)]
    pub upload_as_file: bool,

    /// Skip the confirmation prompt in interactive mode
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl GenerateArgs {
    /// Interactive mode is selected by the absence of a topic.
    pub fn is_interactive(&self) -> bool {
        self.topic.is_none()
    }

    /// Execute the generate command against the real terminal, providers and storage.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing generate command");
        tracing::debug!("Generate options: {:?}", self);

        let store = Arc::new(LazyStore::google(
            config.credentials_path(),
            config.token_path(),
        ));
        let mut generator = Generator::new(config, Console::stdio(), store);

        generator.banner(self.is_interactive())?;
        let model = generator.choose_model(self.is_interactive()).await?;
        let client = create_client(model, &config.endpoints)?;
        generator
            .console
            .say(format!("✓ Initialized AI Model: {}", model.display_name))?;

        generator.run(self, model, &client).await?;
        Ok(())
    }
}

/// Everything collected before the provider is called.
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    pub request: GenerationRequest,
    pub location: String,
}

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Hosted(String),
    Local(PathBuf),
    Cancelled,
}

/// One generation run over a console, a provider and a document store.
pub struct Generator<'a, R, W> {
    config: &'a AppConfig,
    console: Console<R, W>,
    store: Arc<LazyStore>,
    reader: SourceReader,
}

impl<'a, R, W> Generator<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(config: &'a AppConfig, console: Console<R, W>, store: Arc<LazyStore>) -> Self {
        let reader = SourceReader::new(store.clone()).with_base_dir(&config.workspace);
        Self {
            config,
            console,
            store,
            reader,
        }
    }

    pub fn banner(&mut self, interactive: bool) -> AppResult<()> {
        if interactive {
            self.console
                .section("DOCUMENT GENERATOR\nPowered by Multiple AI Models")
        } else {
            self.console.section("DOCUMENT GENERATOR")
        }
    }

    /// The configured model, or the user's pick in interactive mode.
    ///
    /// An unknown configured key is a configuration error; an invalid
    /// interactive answer falls back to the configured model.
    pub async fn choose_model(&mut self, interactive: bool) -> AppResult<&'static ModelDescriptor> {
        let default = registry::lookup(&self.config.model)?;
        if !interactive {
            return Ok(default);
        }

        self.console.section("AI MODEL SELECTION")?;
        self.console.say("Available AI models:\n")?;

        let choices = registry::numbered_choices();
        for (provider, models) in registry::list_by_provider() {
            self.console.say(format!("{}:", provider.display_name()))?;
            for model in models {
                if let Some((number, _)) = choices.iter().find(|(_, m)| m.key == model.key) {
                    self.console
                        .say(format!("  {}. {}", number, model.display_name))?;
                }
            }
            self.console.say("")?;
        }

        let default_number = choices
            .iter()
            .find(|(_, m)| m.key == default.key)
            .map(|(n, _)| *n)
            .unwrap_or(1);
        self.console.say(format!(
            "Default: {} ({})\n",
            default_number, default.display_name
        ))?;

        let choice = self
            .console
            .ask("Enter number or model key (or press Enter for default): ")
            .await?;
        if choice.is_empty() {
            return Ok(default);
        }

        match registry::resolve_choice(&choice) {
            Some(model) => {
                self.console
                    .say(format!("✓ Selected: {}", model.display_name))?;
                Ok(model)
            }
            None => {
                tracing::warn!("Invalid model selection: {}", choice);
                self.console
                    .say(format!("\n⚠ Invalid selection: '{}'", choice))?;
                self.console
                    .say(format!("Using default: {}", default.display_name))?;
                Ok(default)
            }
        }
    }

    /// Gather inputs, generate and save.
    pub async fn run(
        &mut self,
        args: &GenerateArgs,
        model: &ModelDescriptor,
        client: &dyn LlmClient,
    ) -> AppResult<Outcome> {
        let interactive = args.is_interactive();
        let inputs = if interactive {
            self.gather_interactive().await?
        } else {
            self.gather_from_args(args).await?
        };

        self.summary(model, &inputs, interactive)?;

        if interactive && !args.yes {
            let confirm = self
                .console
                .ask("Proceed with document generation? (yes/no): ")
                .await?
                .to_lowercase();
            if confirm != "yes" && confirm != "y" {
                self.console.say("Cancelled.")?;
                return Ok(Outcome::Cancelled);
            }
        }

        let content = self.generate(model, &inputs, client).await?;
        let outcome = self.save(&content, &inputs, args.upload_as_file).await?;

        self.console.section("✓ COMPLETE!")?;
        Ok(outcome)
    }

    async fn gather_from_args(&mut self, args: &GenerateArgs) -> AppResult<GenerationInputs> {
        let config = self.config;
        let defaults = &config.defaults;

        let topic = args.topic.as_deref().unwrap_or_default();
        if topic.trim().is_empty() {
            return Err(AppError::Input("Topic information is required.".to_string()));
        }

        let style_text = match args.style.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(style) => self.read_argument(style, "style").await?,
            None => defaults.style.clone(),
        };
        let topic_text = self.read_argument(topic, "topic").await?;

        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Ok(GenerationInputs {
            request: GenerationRequest {
                style_text,
                topic_text,
                audience: pick(&args.audience, &defaults.audience),
                output_type: pick(&args.output_type, &defaults.output_type),
                size: pick(&args.size, &defaults.size),
            },
            location: pick(&args.output, &defaults.output_location),
        })
    }

    /// Read a flag value that names a file or link; anything else is literal.
    async fn read_argument(&self, value: &str, what: &str) -> AppResult<String> {
        let trimmed = value.trim();
        let names_source =
            is_hosted(trimmed) || trimmed.starts_with('~') || self.reader.locate(trimmed).exists();
        if !names_source {
            return Ok(value.to_string());
        }

        let text = self.reader.try_resolve(trimmed).await.map_err(|e| {
            AppError::Input(format!("Could not read {} file {}: {}", what, trimmed, e))
        })?;
        if text.trim().is_empty() {
            return Err(AppError::Input(format!(
                "Could not read {} file {}: no text found",
                what, trimmed
            )));
        }
        Ok(text)
    }

    async fn gather_interactive(&mut self) -> AppResult<GenerationInputs> {
        let defaults = self.config.defaults.clone();

        self.console.section("WRITING STYLE & VOICE")?;
        self.console
            .say("You can provide the writing style in three ways:")?;
        self.source_hints("style description")?;
        self.console
            .say("Press Enter to use default professional style.\n")?;
        let answer = self.console.ask("Enter file path, link, or text: ").await?;
        let style_text = if answer.is_empty() {
            self.console
                .say("No input provided. Using default professional style.")?;
            defaults.style.clone()
        } else {
            self.read_answer(
                answer,
                "Failed to read file. Please enter style description directly:",
            )
            .await?
        };

        self.console.section("TOPIC, INSIGHTS & QUOTES")?;
        self.console
            .say("Provide your topic content (insights, quotes, key points):")?;
        self.source_hints("topic description")?;
        self.console.say("This field is required.\n")?;
        let answer = self.console.ask("Enter file path, link, or text: ").await?;
        if answer.is_empty() {
            return Err(AppError::Input("Topic information is required.".to_string()));
        }
        let topic_text = self
            .read_answer(
                answer,
                "Failed to read file. Please enter topic information directly:",
            )
            .await?;
        if topic_text.trim().is_empty() {
            return Err(AppError::Input("Topic information is required.".to_string()));
        }

        let audience = self
            .ask_with_default(
                "TARGET AUDIENCE",
                "Who is the target audience for this document?\n\
                 Examples: business leaders, technical professionals, general public, executives",
                "Target audience: ",
                &defaults.audience,
            )
            .await?;
        let output_type = self
            .ask_with_default(
                "OUTPUT TYPE",
                "What type of document should be generated?\n\
                 Examples: blog post, whitepaper, marketing slick, article, report, case study",
                "Output type: ",
                &defaults.output_type,
            )
            .await?;
        let size = self
            .ask_with_default(
                "DOCUMENT SIZE",
                "How long should the document be?\n\
                 Examples: 1 page, 3 pages, 10 pages, 500 words, 2000 words",
                "Document size: ",
                &defaults.size,
            )
            .await?;

        self.console.section("OUTPUT LOCATION")?;
        self.console.say("Where should the document be saved?")?;
        self.console
            .say("  • Directory path: ~/Documents/output (saves as markdown .md file)")?;
        self.console.say(
            "  • Google Drive link: https://drive.google.com/drive/folders/... (creates native Google Doc)",
        )?;
        self.console
            .say("  • Type 'docs' to create in Google Docs root")?;
        self.console.say("  • Press Enter for current directory\n")?;
        let mut location = self
            .console
            .ask("Enter directory path or press Enter: ")
            .await?;
        if location.is_empty() {
            location = defaults.output_location.clone();
            let dir = self.config.resolve_path(&expand_home(&location));
            self.console
                .say(format!("Using current directory: {}", dir.display()))?;
        } else if OutputTarget::parse(&location) == OutputTarget::HostedDocumentRoot {
            self.console.say("Will create as Google Doc")?;
        }

        Ok(GenerationInputs {
            request: GenerationRequest {
                style_text,
                topic_text,
                audience,
                output_type,
                size,
            },
            location,
        })
    }

    fn source_hints(&mut self, what: &str) -> AppResult<()> {
        self.console.say("  • File path: notes/sample.txt")?;
        self.console
            .say("  • Google Drive link: https://docs.google.com/document/d/...")?;
        self.console
            .say(format!("  • Direct text: Type your {} here\n", what))
    }

    /// Resolve an answer that names a file or link, re-asking once for
    /// literal text when nothing could be read.
    async fn read_answer(&mut self, answer: String, retry: &str) -> AppResult<String> {
        let names_source =
            looks_like_location(&answer) || is_hosted(&answer) || self.reader.locate(&answer).exists();
        if !names_source {
            return Ok(answer);
        }

        let text = self.reader.resolve(&answer).await;
        if !text.is_empty() {
            return Ok(text);
        }

        self.console.say(retry)?;
        self.console.ask("> ").await
    }

    async fn ask_with_default(
        &mut self,
        title: &str,
        help: &str,
        prompt: &str,
        default: &str,
    ) -> AppResult<String> {
        self.console.section(title)?;
        self.console.say(format!("{}\n", help))?;
        let answer = self.console.ask(prompt).await?;
        if answer.is_empty() {
            self.console.say(format!("Using default: {}", default))?;
            return Ok(default.to_string());
        }
        Ok(answer)
    }

    fn summary(
        &mut self,
        model: &ModelDescriptor,
        inputs: &GenerationInputs,
        interactive: bool,
    ) -> AppResult<()> {
        let request = &inputs.request;
        self.console
            .section(if interactive { "SUMMARY" } else { "CONFIGURATION" })?;
        self.console
            .say(format!("AI Model: {}", model.display_name))?;
        self.console
            .say(format!("Output Type: {}", request.output_type))?;
        self.console.say(format!("Audience: {}", request.audience))?;
        self.console.say(format!("Size: {}", request.size))?;
        self.console.say(format!(
            "Style Length: {} characters",
            request.style_text.chars().count()
        ))?;
        self.console.say(format!(
            "Topic Length: {} characters",
            request.topic_text.chars().count()
        ))?;
        self.console
            .say(format!("Output Location: {}\n", inputs.location))
    }

    async fn generate(
        &mut self,
        model: &ModelDescriptor,
        inputs: &GenerationInputs,
        client: &dyn LlmClient,
    ) -> AppResult<String> {
        self.console.section("GENERATING DOCUMENT...")?;

        let definition = load_prompt(&self.config.workspace, DEFAULT_PROMPT_ID)?;
        let built = build_prompt(&definition, &inputs.request)?;
        tracing::debug!(
            "Built prompt {} ({} characters)",
            built.metadata.source_prompt_id,
            built.user.len()
        );

        self.console
            .say(format!("Sending request to {}...", model.display_name))?;
        let content = client.generate(&built.user, self.config.max_tokens).await?;

        if content.trim().is_empty() {
            return Err(AppError::Llm(format!(
                "{} returned an empty document",
                model.display_name
            )));
        }

        self.console.say(format!(
            "✓ Generated {} characters",
            content.chars().count()
        ))?;
        Ok(content)
    }

    async fn save(
        &mut self,
        content: &str,
        inputs: &GenerationInputs,
        upload_as_file: bool,
    ) -> AppResult<Outcome> {
        self.console.section("SAVING DOCUMENT...")?;

        let title = derive_title(content, &inputs.request.output_type);
        let target = OutputTarget::parse(&inputs.location);

        if target.is_hosted() {
            if let Some(url) = self
                .save_hosted(&target, &title, content, upload_as_file)
                .await?
            {
                return Ok(Outcome::Hosted(url));
            }
        }

        let dir = match target {
            OutputTarget::LocalDirectory(dir) => dir,
            _ => PathBuf::from("."),
        };
        let dir = self.config.resolve_path(&dir);
        let path = save_local(&dir, &title, content)?;

        self.console.say("✓ Document saved successfully!")?;
        self.console
            .say(format!("  Filename: {}", file_name(&title)))?;
        self.console
            .say(format!("  Location: {}", path.display()))?;
        self.console
            .say(format!("  Size: {} characters", content.chars().count()))?;
        Ok(Outcome::Local(path))
    }

    /// Save to Google; `None` means the caller should save locally.
    async fn save_hosted(
        &mut self,
        target: &OutputTarget,
        title: &str,
        content: &str,
        upload_as_file: bool,
    ) -> AppResult<Option<String>> {
        let Some(store) = self.store.get().await else {
            self.console
                .say("⚠ Google Drive integration not available.")?;
            self.console.say("Saving to current directory instead.")?;
            return Ok(None);
        };

        let result = match (upload_as_file, target.folder_url()) {
            (true, Some(folder_url)) => {
                store
                    .upload_to_folder(&folder_url, &file_name(title), content)
                    .await
            }
            _ => {
                store
                    .create_document(&document_name(title), content, target.folder_id())
                    .await
            }
        };

        match result {
            Ok(url) => {
                let place = if target.folder_id().is_some() {
                    " in folder"
                } else {
                    ""
                };
                if upload_as_file {
                    self.console
                        .say(format!("✓ Document uploaded to Google Drive{}!", place))?;
                    self.console
                        .say(format!("  Filename: {}", file_name(title)))?;
                } else {
                    self.console
                        .say(format!("✓ Document saved as Google Doc{}!", place))?;
                    self.console
                        .say(format!("  Title: {}", document_name(title)))?;
                }
                self.console.say(format!("  URL: {}", url))?;
                self.console
                    .say(format!("  Size: {} characters", content.chars().count()))?;
                Ok(Some(url))
            }
            Err(e) => {
                tracing::warn!("Google Drive save failed: {}", e);
                self.console
                    .say("⚠ Google Drive save failed, saving locally instead...")?;
                Ok(None)
            }
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.console.into_output()
    }
}
