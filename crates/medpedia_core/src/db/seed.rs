//! Built-in sample hierarchy for first-run databases.
//!
//! # Invariants
//! - Seeding runs in a single transaction; a failure leaves no partial rows.
//! - Parents are inserted before their children so `parent_id` always
//!   references an existing row.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection, Transaction};

/// Stored when a seed entry carries no description text.
pub const NO_DESCRIPTION_PLACEHOLDER: &str =
    "No description has been provided for this entry yet.";

/// One node of the static seed hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct SeedTopic {
    pub name: &'static str,
    pub description: &'static str,
    pub children: &'static [SeedTopic],
}

const fn leaf(name: &'static str, description: &'static str) -> SeedTopic {
    SeedTopic {
        name,
        description,
        children: &[],
    }
}

const fn branch(
    name: &'static str,
    description: &'static str,
    children: &'static [SeedTopic],
) -> SeedTopic {
    SeedTopic {
        name,
        description,
        children,
    }
}

/// Root topics of the sample encyclopedia, in insertion order.
pub const SAMPLE_TOPICS: &[SeedTopic] = &[
    branch(
        "Terminology",
        "Core anatomical and clinical vocabulary that defines spatial relationships and common language in healthcare.",
        &[
            branch(
                "Directions",
                "Directional terms describe the location of structures relative to one another.",
                &[
                    leaf(
                        "Anterior (ventral)",
                        "Toward the front surface of the body; often used interchangeably with ventral in human anatomy.",
                    ),
                    leaf(
                        "Posterior (dorsal)",
                        "Toward the back surface of the body, opposite of anterior.",
                    ),
                    leaf(
                        "Superior (cranial)",
                        "Toward the head or upper part of the body; indicates a position above another structure.",
                    ),
                    leaf(
                        "Inferior (caudal)",
                        "Toward the feet or lower part of the body; indicates a position below another structure.",
                    ),
                    leaf(
                        "Medial",
                        "Closer to the median plane of the body or a structure.",
                    ),
                    leaf(
                        "Lateral",
                        "Farther from the median plane of the body or a structure.",
                    ),
                    leaf(
                        "Proximal",
                        "Closer to the point of origin or attachment; frequently used when discussing limbs.",
                    ),
                    leaf(
                        "Distal",
                        "Farther from the point of origin or attachment; opposite of proximal.",
                    ),
                ],
            ),
            branch(
                "Anatomical Regions",
                "Named body regions provide consistent reference points for examinations and procedures.",
                &[
                    leaf(
                        "Ventral Cavity",
                        "The anterior body cavity that houses thoracic, abdominal, and pelvic organs.",
                    ),
                    leaf(
                        "Dorsal Cavity",
                        "Posterior body cavity containing the cranial and vertebral spaces.",
                    ),
                    leaf(
                        "Quadrants",
                        "Abdominal surface divided into right/left upper and lower quadrants for assessment.",
                    ),
                    leaf(
                        "Surface Landmarks",
                        "External anatomical markers such as the sternal angle and iliac crest used for orientation.",
                    ),
                ],
            ),
            branch(
                "Clinical Abbreviations",
                "Shortened forms and acronyms commonly encountered in clinical documentation.",
                &[
                    leaf(
                        "PRN",
                        "Pro re nata; indicates a medication is given as needed based on patient symptoms.",
                    ),
                    leaf(
                        "NPO",
                        "Nil per os; instructs that the patient should refrain from oral intake.",
                    ),
                    leaf(
                        "Stat",
                        "Immediately; denotes urgency in orders and interventions.",
                    ),
                ],
            ),
        ],
    ),
    branch(
        "Cellular Biology",
        "Foundational processes that govern cell structure, function, and replication.",
        &[
            branch(
                "Cell Cycle",
                "A regulated sequence of growth (G1), DNA synthesis (S), preparation for mitosis (G2), and division (M). Checkpoints ensure fidelity.",
                &[
                    leaf(
                        "G1 Phase",
                        "Cell grows, produces organelles, and monitors the environment before committing to DNA replication.",
                    ),
                    leaf(
                        "S Phase",
                        "DNA replication occurs, producing identical sister chromatids for each chromosome.",
                    ),
                    leaf(
                        "G2 Phase",
                        "Cell continues to grow and synthesizes proteins required for mitosis; DNA is checked for damage.",
                    ),
                    leaf(
                        "M Phase",
                        "Mitosis and cytokinesis separate duplicated chromosomes and divide the cytoplasm into two daughter cells.",
                    ),
                ],
            ),
            branch(
                "Organelles",
                "Membrane-bound structures with specialized functions essential to cell physiology.",
                &[
                    leaf(
                        "Mitochondria",
                        "Powerhouses of the cell generating ATP through oxidative phosphorylation; contain their own DNA.",
                    ),
                    leaf(
                        "Endoplasmic Reticulum",
                        "Network responsible for protein synthesis (rough ER) and lipid metabolism (smooth ER).",
                    ),
                    leaf(
                        "Golgi Apparatus",
                        "Modifies, sorts, and packages proteins and lipids for secretion or delivery to organelles.",
                    ),
                    leaf(
                        "Lysosomes",
                        "Acidic vesicles containing hydrolytic enzymes for intracellular digestion and recycling.",
                    ),
                ],
            ),
            branch(
                "Cell Signaling",
                "Communication pathways that allow cells to sense and respond to their environment.",
                &[
                    leaf(
                        "Autocrine",
                        "Signals released and received by the same cell, often regulating growth.",
                    ),
                    leaf(
                        "Paracrine",
                        "Signals travel short distances to nearby cells to coordinate local responses.",
                    ),
                    leaf(
                        "Endocrine",
                        "Hormones enter the bloodstream to influence distant target cells.",
                    ),
                    leaf(
                        "Second Messengers",
                        "Intracellular signaling molecules such as cAMP and calcium that amplify receptor activation.",
                    ),
                ],
            ),
        ],
    ),
    branch(
        "Clinical Skills",
        "Practical competencies that underpin patient assessment and care delivery.",
        &[
            leaf(
                "History Taking",
                "Structured approach to gathering subjective information including chief complaint, history of present illness, and review of systems.",
            ),
            branch(
                "Physical Examination",
                "Systematic evaluation of the body using inspection, palpation, percussion, and auscultation.",
                &[
                    leaf(
                        "Cardiovascular Exam",
                        "Assessment of heart sounds, jugular venous pressure, and peripheral pulses to evaluate cardiac function.",
                    ),
                    leaf(
                        "Respiratory Exam",
                        "Evaluation of breathing patterns, lung sounds, and percussion tones to detect pulmonary pathology.",
                    ),
                    leaf(
                        "Neurologic Exam",
                        "Series of tests assessing cranial nerves, motor function, sensation, reflexes, and coordination.",
                    ),
                ],
            ),
            leaf(
                "Procedural Basics",
                "Essential bedside skills such as venipuncture, arterial line placement, and basic suturing.",
            ),
        ],
    ),
];

/// Returns how many rows seeding `topics` inserts.
pub fn count_seed_topics(topics: &[SeedTopic]) -> usize {
    topics
        .iter()
        .map(|topic| 1 + count_seed_topics(topic.children))
        .sum()
}

/// Inserts [`SAMPLE_TOPICS`] in one transaction.
///
/// Returns the number of inserted rows.
pub fn populate_sample_data(conn: &mut Connection) -> DbResult<usize> {
    populate(conn, SAMPLE_TOPICS)
}

/// Inserts an arbitrary seed hierarchy in one transaction.
pub fn populate(conn: &mut Connection, topics: &[SeedTopic]) -> DbResult<usize> {
    let tx = conn.transaction()?;
    let inserted = insert_level(&tx, topics, None)?;
    tx.commit()?;

    info!("event=db_seed module=db status=ok inserted={inserted}");
    Ok(inserted)
}

fn insert_level(
    tx: &Transaction<'_>,
    topics: &[SeedTopic],
    parent_id: Option<i64>,
) -> DbResult<usize> {
    let mut inserted = 0;
    for topic in topics {
        let description = if topic.description.trim().is_empty() {
            NO_DESCRIPTION_PLACEHOLDER
        } else {
            topic.description
        };
        tx.execute(
            "INSERT INTO topics (name, description, parent_id) VALUES (?1, ?2, ?3);",
            params![topic.name, description, parent_id],
        )?;
        let topic_id = tx.last_insert_rowid();
        inserted += 1 + insert_level(tx, topic.children, Some(topic_id))?;
    }
    Ok(inserted)
}
