use quiz_core::model::Score;
use quiz_core::time::fixed_clock;
use services::sessions::view;
use services::{
    AppServices, AttemptOutcome, ConsoleError, ScriptedConsole, SessionError, UserSession,
};
use storage::repository::Storage;
use storage::seed::{CatalogSeed, QuizSeed};

/// In-memory services with the built-in catalog plus an empty "Drafts" quiz,
/// and a logged-in user.
async fn setup() -> (AppServices, UserSession) {
    let services = AppServices::from_storage(&Storage::in_memory(), fixed_clock());

    let mut catalog = CatalogSeed::builtin();
    catalog.quizzes.push(QuizSeed {
        name: "Drafts".into(),
        questions: Vec::new(),
    });
    services.catalog().seed(&catalog).await.unwrap();

    services.accounts().register("Tester", "pw").await.unwrap();
    let session = services.accounts().login("tester", "pw").await.unwrap();
    (services, session)
}

async fn attempts_recorded(services: &AppServices, session: &UserSession) -> usize {
    services.results().get_results(session).await.unwrap().len()
}

#[tokio::test]
async fn mixed_answers_score_one_of_three() {
    let (services, session) = setup().await;
    // Python: option 2 is correct, option 3 ("String") is wrong, 9 is out of range.
    let mut console = ScriptedConsole::new(["1", "2", "3", "9"]);

    let outcome = services
        .sessions()
        .run_attempt(&session, &mut console)
        .await
        .unwrap();

    let AttemptOutcome::Completed(done) = outcome else {
        panic!("expected a completed attempt");
    };
    assert_eq!(done.quiz.name(), "Python");
    assert_eq!(done.score, Score::new(1, 3).unwrap());
    assert!(console.saw("You scored 1/3!"));
    assert!(console.saw(view::INVALID_ANSWER));

    let results = services.results().get_results(&session).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].quiz_name, "Python");
    assert_eq!(results[0].score.correct(), 1);
}

#[tokio::test]
async fn all_correct_and_all_invalid_bounds() {
    let (services, session) = setup().await;

    // DBMS answers: 1, 2, 3 are all correct.
    let mut best = ScriptedConsole::new(["2", "1", "2", "3"]);
    let outcome = services
        .sessions()
        .run_attempt(&session, &mut best)
        .await
        .unwrap();
    assert!(matches!(outcome, AttemptOutcome::Completed(ref c) if c.score == Score::new(3, 3).unwrap()));

    let mut worst = ScriptedConsole::new(["2", "zero", "0", " "]);
    let outcome = services
        .sessions()
        .run_attempt(&session, &mut worst)
        .await
        .unwrap();
    assert!(matches!(outcome, AttemptOutcome::Completed(ref c) if c.score == Score::new(0, 3).unwrap()));

    assert_eq!(attempts_recorded(&services, &session).await, 2);
}

#[tokio::test]
async fn questions_are_presented_in_stored_order() {
    let (services, session) = setup().await;
    let mut console = ScriptedConsole::new(["3", "2", "2", "4"]);
    services
        .sessions()
        .run_attempt(&session, &mut console)
        .await
        .unwrap();

    let questions: Vec<_> = console
        .output()
        .iter()
        .filter(|line| line.contains("\n1. "))
        .skip(1) // quiz menu
        .collect();
    assert_eq!(questions.len(), 3);
    assert!(questions[0].contains("balanced binary search tree"));
    assert!(questions[1].contains("implement recursion"));
    assert!(questions[2].contains("\n4. Dijktra's Algorithm"));
    assert_eq!(
        console.prompts().iter().filter(|p| *p == view::ANSWER_PROMPT).count(),
        3
    );
}

#[tokio::test]
async fn invalid_selection_records_nothing() {
    let (services, session) = setup().await;

    for choice in ["0", "5", "python", ""] {
        let mut console = ScriptedConsole::new([choice, "1", "1", "1"]);
        let err = services
            .sessions()
            .run_attempt(&session, &mut console)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidSelection));
        assert!(console.saw(view::INVALID_SELECTION));
        // No question was asked.
        assert_eq!(console.remaining_inputs(), 3);
    }

    assert_eq!(attempts_recorded(&services, &session).await, 0);
}

#[tokio::test]
async fn empty_quiz_is_a_no_op() {
    let (services, session) = setup().await;
    let mut console = ScriptedConsole::new(["4"]);

    let outcome = services
        .sessions()
        .run_attempt(&session, &mut console)
        .await
        .unwrap();

    assert_eq!(outcome, AttemptOutcome::NoQuestionsAvailable);
    assert!(console.saw(view::NO_QUESTIONS));
    assert_eq!(attempts_recorded(&services, &session).await, 0);
}

#[tokio::test]
async fn input_ending_mid_attempt_records_nothing() {
    let (services, session) = setup().await;
    let mut console = ScriptedConsole::new(["1", "2"]);

    let err = services
        .sessions()
        .run_attempt(&session, &mut console)
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Console(ConsoleError::Closed)));
    assert_eq!(attempts_recorded(&services, &session).await, 0);
}

#[tokio::test]
async fn results_are_per_user() {
    let (services, alice) = setup().await;
    services.accounts().register("bob", "pw").await.unwrap();
    let bob = services.accounts().login("BOB", "pw").await.unwrap();

    let mut console = ScriptedConsole::new(["3", "2", "2", "4"]);
    services
        .sessions()
        .run_attempt(&bob, &mut console)
        .await
        .unwrap();

    assert_eq!(attempts_recorded(&services, &bob).await, 1);
    assert_eq!(attempts_recorded(&services, &alice).await, 0);
    let bob_results = services.results().get_results(&bob).await.unwrap();
    assert_eq!(bob_results[0].quiz_name, "DSA");
    assert_eq!(bob_results[0].score, Score::new(3, 3).unwrap());
}

#[tokio::test]
async fn sqlite_backed_services_seed_once_and_record_scores() {
    let url = "sqlite:file:memdb_services_e2e?mode=memory&cache=shared";
    let (services, first) = AppServices::new_sqlite(url, fixed_clock(), &CatalogSeed::builtin())
        .await
        .unwrap();
    assert_eq!(first.questions_inserted, 9);

    let (_again, second) = AppServices::new_sqlite(url, fixed_clock(), &CatalogSeed::builtin())
        .await
        .unwrap();
    assert_eq!(second.quizzes_inserted, 0);
    assert_eq!(second.questions_inserted, 0);

    services.accounts().register("erin", "pw").await.unwrap();
    let session = services.accounts().login("Erin", "pw").await.unwrap();
    let mut console = ScriptedConsole::new(["1", "2", "3", "9"]);
    let outcome = services
        .sessions()
        .run_attempt(&session, &mut console)
        .await
        .unwrap();
    assert!(matches!(outcome, AttemptOutcome::Completed(ref c) if c.score.correct() == 1));

    let results = services.results().get_results(&session).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].to_string(), "Quiz: Python, Score: 1/3");
}
