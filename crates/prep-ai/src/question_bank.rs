//! Static quiz questions per topic.
//!
//! Fallback source when AI generation is unavailable. Unknown topics get a
//! generic question template so a quiz can always be served.

use crate::quiz::QuizQuestion;

fn question(text: &str, options: [&str; 4], answer: usize) -> QuizQuestion {
    QuizQuestion {
        question: text.to_string(),
        options: options.map(str::to_string).to_vec(),
        answer,
    }
}

/// Questions for a topic, by exact name match, with a generic fallback.
pub fn questions_for(topic_name: &str) -> Vec<QuizQuestion> {
    match topic_name {
        "Thermodynamics" => vec![
            question(
                "What is the first law of thermodynamics?",
                [
                    "Energy cannot be created or destroyed",
                    "Entropy always increases",
                    "Heat flows from cold to hot",
                    "Temperature is constant",
                ],
                0,
            ),
            question(
                "Which process occurs at constant temperature?",
                ["Adiabatic", "Isobaric", "Isothermal", "Isochoric"],
                2,
            ),
            question("What is the SI unit of entropy?", ["Joule", "J/K", "Kelvin", "Watt"], 1),
            question(
                "In an adiabatic process, what is zero?",
                ["Work done", "Heat transfer", "Internal energy change", "Pressure change"],
                1,
            ),
            question(
                "What is the Carnot efficiency formula?",
                ["1 - Tc/Th", "Tc/Th", "Th - Tc", "1 - Th/Tc"],
                0,
            ),
        ],
        "Mechanics" => vec![
            question("Newton's second law states?", ["F = ma", "F = mv", "F = m/a", "F = a/m"], 0),
            question("What is the unit of momentum?", ["N", "kg·m/s", "J", "W"], 1),
            question("Kinetic energy formula?", ["½mv", "½mv²", "mv²", "½m²v"], 1),
            question(
                "What is projectile motion?",
                ["Linear only", "Circular", "Combination of horizontal and vertical", "Random"],
                2,
            ),
            question(
                "Conservation of momentum applies when?",
                ["No external forces", "With friction", "Always", "Never"],
                0,
            ),
        ],
        "Calculus" => vec![
            question("What is the derivative of x²?", ["x", "2x", "x²", "2x²"], 1),
            question("∫ 2x dx = ?", ["x²+C", "2x²+C", "x+C", "2+C"], 0),
            question(
                "What is the chain rule used for?",
                ["Addition", "Composite functions", "Division", "Products"],
                1,
            ),
            question("Limit of sin(x)/x as x→0 is?", ["0", "1", "∞", "undefined"], 1),
            question(
                "The integral represents?",
                ["Slope", "Area under curve", "Tangent", "Normal"],
                1,
            ),
        ],
        "Probability" => vec![
            question(
                "P(A∪B) for independent events?",
                ["P(A)+P(B)", "P(A)+P(B)-P(A∩B)", "P(A)×P(B)", "P(A)-P(B)"],
                1,
            ),
            question(
                "Bayes' theorem is used for?",
                [
                    "Prior probability",
                    "Conditional probability",
                    "Joint probability",
                    "Marginal probability",
                ],
                1,
            ),
            question("Expected value of a fair die?", ["3", "3.5", "4", "6"], 1),
            question(
                "Standard deviation is the square root of?",
                ["Mean", "Median", "Variance", "Mode"],
                2,
            ),
            question(
                "Normal distribution is?",
                ["Skewed left", "Skewed right", "Symmetric", "Uniform"],
                2,
            ),
        ],
        _ => generic_questions(topic_name),
    }
}

/// Generic template for topics the bank does not know.
fn generic_questions(topic_name: &str) -> Vec<QuizQuestion> {
    vec![
        question(
            &format!("What is the core concept of {topic_name}?"),
            ["Option A", "Option B", "Option C", "Option D"],
            0,
        ),
        question(
            &format!("Which principle applies to {topic_name}?"),
            ["Principle 1", "Principle 2", "Principle 3", "Principle 4"],
            1,
        ),
        question(
            &format!("What is the formula for {topic_name}?"),
            ["Formula A", "Formula B", "Formula C", "Formula D"],
            2,
        ),
        question(
            &format!("Who contributed most to {topic_name}?"),
            ["Scientist A", "Scientist B", "Scientist C", "Scientist D"],
            0,
        ),
        question(
            &format!("What application uses {topic_name}?"),
            ["Application 1", "Application 2", "Application 3", "Application 4"],
            1,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{OPTIONS_PER_QUESTION, QUIZ_LEN};

    #[test]
    fn test_known_topics_have_full_quizzes() {
        for topic in ["Thermodynamics", "Mechanics", "Calculus", "Probability"] {
            let quiz = questions_for(topic);
            assert_eq!(quiz.len(), QUIZ_LEN, "{topic}");
            for question in &quiz {
                assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
                assert!(question.answer < OPTIONS_PER_QUESTION);
            }
        }
    }

    #[test]
    fn test_unknown_topic_gets_generic_quiz() {
        let quiz = questions_for("Quantum Basket Weaving");
        assert_eq!(quiz.len(), QUIZ_LEN);
        assert!(quiz[0].question.contains("Quantum Basket Weaving"));
    }
}
