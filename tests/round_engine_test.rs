use hangterm::games::hangman::{Guess, Round, RoundOutcome, ValidationError};
use proptest::prelude::*;

#[test]
fn cat_is_revealed_letter_by_letter() {
    let mut round = Round::start("CAT", "Pet", 7, 60).unwrap();
    assert_eq!(round.masked_word(), "___");

    let mut seen = Vec::new();
    for letter in ['C', 'A', 'T'] {
        assert_eq!(round.outcome(), RoundOutcome::InProgress);
        assert_eq!(round.guess(letter), Guess::Hit(1));
        seen.push(round.masked_word());
    }

    assert_eq!(seen, vec!["C__", "CA_", "CAT"]);
    assert_eq!(round.outcome(), RoundOutcome::Won);
    assert_eq!(round.wrong_guesses(), 0);
}

#[test]
fn single_life_lost_on_first_miss() {
    let mut round = Round::start("DOG", "Barks", 1, 60).unwrap();
    assert_eq!(round.guess('Z'), Guess::Miss);
    assert_eq!(round.wrong_guesses(), 1);
    assert_eq!(round.outcome(), RoundOutcome::LostByLives);

    assert_eq!(round.guess('D'), Guess::Ignored);
    assert_eq!(round.masked_word(), "___");
}

#[test]
fn clock_runs_out_without_any_guess() {
    let mut round = Round::start("DOG", "Barks", 7, 60).unwrap();
    assert!(round.tick(61.0));
    assert_eq!(round.time_remaining(), 0.0);
    assert_eq!(round.outcome(), RoundOutcome::LostByTimeout);
    assert_eq!(round.wrong_guesses(), 0);
    assert_eq!(round.tried_letters().count(), 0);
}

#[test]
fn zero_time_limit_never_opens_a_round() {
    assert_eq!(Round::start("cat", "Pet", 7, 0), Err(ValidationError::NoTime));

    // shortest legal clock: the first tick past it ends the round before any guess
    let mut round = Round::start("cat", "Pet", 7, 1).unwrap();
    assert!(round.tick(1.0));
    assert_eq!(round.guess('c'), Guess::Ignored);
    assert_eq!(round.masked_word(), "___");
    assert_eq!(round.outcome(), RoundOutcome::LostByTimeout);
}

#[test]
fn lowercase_guess_matches_uppercase_word() {
    let mut round = Round::start("Hello World", "Greeting", 7, 60).unwrap();
    assert_eq!(round.guess('l'), Guess::Hit(3));
    assert_eq!(round.guess('o'), Guess::Hit(2));
    assert_eq!(round.masked_word(), "__llo _o_l_");
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z ]{1,20}".prop_filter("needs a letter", |w| w.chars().any(|c| c.is_ascii_alphabetic()))
}

proptest! {
    #[test]
    fn mask_hides_exactly_the_letters(word in word()) {
        let round = Round::start(&word, "hint", 7, 60).unwrap();
        let masked = round.masked_word();
        prop_assert_eq!(masked.chars().count(), word.chars().count());
        for (m, w) in masked.chars().zip(word.chars()) {
            if w == ' ' {
                prop_assert_eq!(m, ' ');
            } else {
                prop_assert_eq!(m, '_');
            }
        }
    }

    #[test]
    fn repeated_guess_is_a_no_op(word in word(), letter in proptest::char::range('a', 'z')) {
        let mut once = Round::start(&word, "hint", 7, 60).unwrap();
        once.guess(letter);
        let mut twice = once.clone();
        prop_assert_eq!(twice.guess(letter), Guess::Ignored);
        prop_assert_eq!(twice.guess(letter.to_ascii_uppercase()), Guess::Ignored);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn wrong_guesses_never_exceed_limit(
        word in word(),
        max in 1u8..=7,
        letters in proptest::collection::vec(proptest::char::range('A', 'Z'), 0..40),
    ) {
        let mut round = Round::start(&word, "hint", max, 60).unwrap();
        for letter in letters {
            let before = round.clone();
            round.guess(letter);
            prop_assert!(round.wrong_guesses() <= max);
            if before.wrong_guesses() == max {
                prop_assert_eq!(before.outcome(), RoundOutcome::LostByLives);
                prop_assert_eq!(&round, &before);
            }
        }
    }

    #[test]
    fn won_iff_every_letter_revealed(
        word in word(),
        letters in proptest::collection::vec(proptest::char::range('A', 'Z'), 0..30),
    ) {
        let mut round = Round::start(&word, "hint", 7, 60).unwrap();
        for letter in letters {
            round.guess(letter);
            let revealed = !round.masked_word().contains('_');
            prop_assert_eq!(round.outcome() == RoundOutcome::Won, revealed);
        }
    }
}
