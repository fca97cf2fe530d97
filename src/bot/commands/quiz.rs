//! Flavor quiz commands - find the cake that matches your palate.
//!
//! Three questions, one recommendation. Each user gets their own session;
//! the result can go straight into the cart or the quiz can start over.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::quiz::{FlavorQuiz, QuizStage},
        errors::Result,
    };

    fn render_question(quiz: &FlavorQuiz, total: usize) -> String {
        let QuizStage::Question(index) = quiz.stage() else {
            return String::new();
        };
        let Some(question) = quiz.current_question() else {
            return String::new();
        };

        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {}", i + 1, option.text))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "**Soru {} / {total}**\n{}\n\n{options}\n\nCevabınız için: `/quiz answer <numara>`",
            index + 1,
            question.text
        )
    }

    fn render_result(ctx: Context<'_>, quiz: &FlavorQuiz) -> String {
        let Some(item) = quiz.matched_item(&ctx.data().catalog) else {
            return "Bir sonuç bulamadık; `/quiz restart` ile tekrar deneyin.".to_string();
        };

        format!(
            "✨ **Senin Lezzetin: \"{}\"**\n\
             Verdiğin cevaplara göre; {} Tam sana göre!\n\n\
             🛒 `/quiz pick` - Hemen sepete ekle\n\
             🔄 `/quiz restart` - Testi tekrar çöz",
            item.name, item.description
        )
    }

    /// Parent command for the flavor quiz.
    #[poise::command(slash_command, subcommands("quiz_start", "quiz_answer", "quiz_restart", "quiz_pick"))]
    pub async fn quiz(ctx: Context<'_>) -> Result<()> {
        ctx.say(
            "**Ruh Eşin Olan Pastayı Bul!**\n\
             Kararsız mı kaldın? Sadece 3 soruda damak zevkine en uygun lezzeti senin için \
             seçelim. Başlamak için: `/quiz start`",
        )
        .await?;
        Ok(())
    }

    /// Starts (or restarts) the quiz at the first question.
    #[poise::command(slash_command, rename = "start")]
    pub async fn quiz_start(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let mut quiz = FlavorQuiz::new(data.content.quiz.clone());
        quiz.start();

        let total = data.content.quiz.questions.len();
        let rendered = render_question(&quiz, total);
        data.quizzes.write().await.insert(ctx.author().id, quiz);

        ctx.say(rendered).await?;
        Ok(())
    }

    /// Answers the current question by option number.
    #[poise::command(slash_command, rename = "answer")]
    pub async fn quiz_answer(
        ctx: Context<'_>,
        #[description = "Seçtiğiniz cevabın numarası"] choice: usize,
    ) -> Result<()> {
        let data = ctx.data();
        let total = data.content.quiz.questions.len();
        let mut quizzes = data.quizzes.write().await;

        let Some(quiz) = quizzes.get_mut(&ctx.author().id) else {
            drop(quizzes);
            ctx.say("Önce `/quiz start` ile testi başlatın.").await?;
            return Ok(());
        };

        let accepted = choice
            .checked_sub(1)
            .is_some_and(|index| quiz.answer(index));

        let rendered = if accepted {
            match quiz.stage() {
                QuizStage::Result(_) => render_result(ctx, quiz),
                _ => render_question(quiz, total),
            }
        } else {
            "Bu cevabı alamadım; sorudaki numaralardan birini seçer misiniz?".to_string()
        };
        drop(quizzes);

        ctx.say(rendered).await?;
        Ok(())
    }

    /// Resets the tallies and starts over.
    #[poise::command(slash_command, rename = "restart")]
    pub async fn quiz_restart(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let total = data.content.quiz.questions.len();
        let mut quizzes = data.quizzes.write().await;

        let Some(quiz) = quizzes.get_mut(&ctx.author().id) else {
            drop(quizzes);
            ctx.say("Önce `/quiz start` ile testi başlatın.").await?;
            return Ok(());
        };

        quiz.restart();
        quiz.start();
        let rendered = render_question(quiz, total);
        drop(quizzes);

        ctx.say(rendered).await?;
        Ok(())
    }

    /// Adds the matched cake to the cart and closes the quiz.
    #[poise::command(slash_command, rename = "pick")]
    pub async fn quiz_pick(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let matched = {
            let quizzes = data.quizzes.read().await;
            quizzes
                .get(&ctx.author().id)
                .and_then(|quiz| quiz.matched_item(&data.catalog).cloned())
        };

        let Some(item) = matched else {
            ctx.say("Henüz bir sonucunuz yok; `/quiz start` ile testi çözün.").await?;
            return Ok(());
        };

        let name = item.name.clone();
        data.cart.add(item).await?;
        data.quizzes.write().await.remove(&ctx.author().id);

        ctx.say(format!(
            "✅ **{name}** sepete eklendi! `/cart show` ile sepetinize bakabilirsiniz."
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
