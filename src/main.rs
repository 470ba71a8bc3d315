mod action;
mod config;
mod dispatch;
mod error;
mod machine;
mod plan;
mod quiz;
mod session;

use std::sync::Arc;

use action::Action;
use config::Config;
use dotenv::dotenv;
use error::StartupError;
use machine::QuizMachine;
use session::InMemorySessionStore;
use teloxide::{prelude::*, utils::command::BotCommands};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type Machine = Arc<QuizMachine<InMemorySessionStore>>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
enum Command {
    #[command(description = "выбрать тест")]
    Start,
    #[command(description = "узнать о гайде")]
    Guide,
}

#[tokio::main]
async fn main() {
    // A missing .env is fine, the variables may come from the environment.
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting quiz bot...");

    if let Err(err) = run().await {
        log::error!("Failed to start the bot: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let content = config.load_content()?;
    for variant in quiz::QuizVariant::ALL {
        log::info!(
            "Loaded quiz `{}` with {} questions",
            variant,
            content.quizzes.questions_for(variant).len()
        );
    }

    let machine: Machine = Arc::new(QuizMachine::new(
        Arc::new(content),
        InMemorySessionStore::new(),
    ));
    let bot = Bot::new(config.token);

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(on_command),
                )
                .branch(dptree::endpoint(on_text)),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![machine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    Ok(())
}

async fn on_command(bot: Bot, machine: Machine, msg: Message, cmd: Command) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let action = match cmd {
        Command::Start => Action::Start {
            first_name: Some(user.first_name.clone()),
        },
        Command::Guide => Action::RequestGuide,
    };
    let plan = machine.handle_action(user.id.0, action);
    dispatch::deliver(&bot, msg.chat.id, plan).await
}

async fn on_text(bot: Bot, machine: Machine, msg: Message) -> HandlerResult {
    let (Some(user), Some(text)) = (msg.from(), msg.text()) else {
        return Ok(());
    };
    let Some(action) = Action::from_text(&machine.content().quizzes, text) else {
        log::debug!("user {}: unknown command {:?}, ignoring", user.id, text);
        return Ok(());
    };
    let plan = machine.handle_action(user.id.0, action);
    dispatch::deliver(&bot, msg.chat.id, plan).await
}

async fn on_callback(bot: Bot, machine: Machine, q: CallbackQuery) -> HandlerResult {
    // Always stop the button's spinner, even for tokens we don't know.
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(action) = q.data.as_deref().and_then(Action::from_callback) else {
        log::debug!("user {}: unknown callback {:?}", q.from.id, q.data);
        return Ok(());
    };
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat.id)
        .unwrap_or(ChatId(q.from.id.0 as i64));

    let plan = machine.handle_action(q.from.id.0, action);
    dispatch::deliver(&bot, chat_id, plan).await
}
