//! Fixed-layout plan for the composite worksheet.
//!
//! Lays out the title and the four content sections top-to-bottom at the
//! original's deterministic vertical offsets. The final page height is
//! fixed by the last write position, not computed from content.

use crate::answers::{AnswerKey, AnswerStore};
use crate::palette::Color;
use crate::rendering::paint::{PaintCommand, TextAlign};

/// Horizontal page margin; section boxes span `width - 2 * PAGE_MARGIN`.
pub const PAGE_MARGIN: u32 = 40;

/// Section accent colors from the original activity.
pub const ORANGE: Color = Color::new(0xfd, 0x7e, 0x00);
pub const TEAL: Color = Color::new(0x00, 0xb1, 0xb0);

/// 10% alpha over white, used for section background tints.
const TINT_ALPHA: u8 = 26;

/// Rendered in any answer slot whose stored value is empty.
pub const PLACEHOLDER: &str = "(未回答)";
/// Rendered when the worksheet name is empty.
pub const NAME_FALLBACK: &str = "なまえなし";

// Glyph scales standing in for the original font sizes (glyphs are 7px
// tall at scale 1): 52px bold -> 7, 32px -> 4, 28px bold -> 4, 22px -> 3,
// 20px -> 2.
const SCALE_TITLE: u32 = 7;
const SCALE_NAME: u32 = 4;
const SCALE_HEADER: u32 = 4;
const SCALE_SUBTITLE: u32 = 3;
const SCALE_BODY: u32 = 2;

/// The full paint plan for one worksheet page.
#[derive(Debug, Clone)]
pub struct WorksheetPlan {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

fn answer_or_placeholder(answers: &AnswerStore, key: AnswerKey) -> String {
    let value = answers.get(key);
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Display name: the worksheet name or the fixed fallback label.
pub fn display_name(answers: &AnswerStore) -> String {
    let name = answers.get(AnswerKey::WorksheetName);
    if name.is_empty() {
        NAME_FALLBACK.to_string()
    } else {
        name.to_string()
    }
}

/// Compute the paint plan for the current answers. The drawing surface is
/// referenced by a `Blit` command and composited by the rasterizer.
pub fn plan_worksheet(answers: &AnswerStore, width: u32) -> WorksheetPlan {
    let box_x = PAGE_MARGIN as i32;
    let box_w = width - 2 * PAGE_MARGIN;
    let mut commands = Vec::new();

    let fill = |commands: &mut Vec<PaintCommand>, y: i32, h: u32, color: Color| {
        commands.push(PaintCommand::FillRect {
            x: box_x,
            y,
            width: box_w,
            height: h,
            color,
            alpha: TINT_ALPHA,
        });
    };
    let frame = |commands: &mut Vec<PaintCommand>, y: i32, h: u32, color: Color, lw: u32| {
        commands.push(PaintCommand::StrokeRect {
            x: box_x,
            y,
            width: box_w,
            height: h,
            color,
            line_width: lw,
        });
    };
    let text = |commands: &mut Vec<PaintCommand>,
                x: i32,
                y: i32,
                s: String,
                color: Color,
                scale: u32| {
        commands.push(PaintCommand::Text {
            x,
            y,
            text: s,
            color,
            scale,
            align: TextAlign::Left,
        });
    };

    // Title, centered
    commands.push(PaintCommand::Text {
        x: width as i32 / 2,
        y: 70,
        text: "🐱 ネコの環世界デジタルワークシート".to_string(),
        color: ORANGE,
        scale: SCALE_TITLE,
        align: TextAlign::Center,
    });

    let mut y_pos: i32 = 140;

    // Name line
    text(
        &mut commands,
        60,
        y_pos,
        format!("なまえ: {}", display_name(answers)),
        Color::BLACK,
        SCALE_NAME,
    );
    y_pos += 50;

    // Section 1: two answers side by side
    fill(&mut commands, y_pos, 180, ORANGE);
    frame(&mut commands, y_pos, 180, ORANGE, 3);
    text(
        &mut commands,
        60,
        y_pos + 40,
        "🐾 ① ネコになってみよう!".to_string(),
        ORANGE,
        SCALE_HEADER,
    );
    text(
        &mut commands,
        60,
        y_pos + 75,
        "ネコは、私たちよりずっと低い場所から世界を見ています。".to_string(),
        ORANGE,
        SCALE_SUBTITLE,
    );
    let q1y = y_pos + 115;
    text(
        &mut commands,
        80,
        q1y,
        "いちばん近くに見えるものは?".to_string(),
        Color::BLACK,
        SCALE_BODY,
    );
    text(
        &mut commands,
        80,
        q1y + 25,
        format!("→ {}", answer_or_placeholder(answers, AnswerKey::Closest)),
        Color::BLACK,
        SCALE_BODY,
    );
    text(
        &mut commands,
        580,
        q1y,
        "いちばん遠くに見えるものは?".to_string(),
        Color::BLACK,
        SCALE_BODY,
    );
    text(
        &mut commands,
        580,
        q1y + 25,
        format!("→ {}", answer_or_placeholder(answers, AnswerKey::Furthest)),
        Color::BLACK,
        SCALE_BODY,
    );
    y_pos += 200;

    // Section 2: five labeled answers
    fill(&mut commands, y_pos, 360, TEAL);
    frame(&mut commands, y_pos, 360, TEAL, 3);
    text(
        &mut commands,
        60,
        y_pos + 40,
        "🎨 ② ネコの世界はどう見える?".to_string(),
        TEAL,
        SCALE_HEADER,
    );
    text(
        &mut commands,
        60,
        y_pos + 75,
        "(ネコにはどう見える?:色・大きさ・動き など)".to_string(),
        TEAL,
        SCALE_BODY,
    );
    let items = [
        ("赤いボール", AnswerKey::RedBall),
        ("カーテン", AnswerKey::Curtain),
        ("太陽の光", AnswerKey::Sunlight),
        ("飼い主(人)", AnswerKey::Owner),
        ("かくれる場所", AnswerKey::HidingSpot),
    ];
    let mut item_y = y_pos + 110;
    for (label, key) in items {
        text(
            &mut commands,
            80,
            item_y,
            format!("{}: {}", label, answer_or_placeholder(answers, key)),
            Color::BLACK,
            SCALE_BODY,
        );
        item_y += 45;
    }
    y_pos += 380;

    // Section 3: header band, then the bordered drawing box
    fill(&mut commands, y_pos, 50, ORANGE);
    frame(&mut commands, y_pos, 50, ORANGE, 3);
    text(
        &mut commands,
        60,
        y_pos + 35,
        "✏️ ③ ネコの世界を描いてみよう!".to_string(),
        ORANGE,
        SCALE_HEADER,
    );
    y_pos += 60;

    commands.push(PaintCommand::FillRect {
        x: box_x,
        y: y_pos,
        width: box_w,
        height: 500,
        color: Color::WHITE,
        alpha: 255,
    });
    frame(&mut commands, y_pos, 500, ORANGE, 4);
    commands.push(PaintCommand::Blit {
        x: box_x,
        y: y_pos,
        width: box_w,
        height: 500,
    });
    y_pos += 520;

    // Section 4: three answers
    fill(&mut commands, y_pos, 240, TEAL);
    frame(&mut commands, y_pos, 240, TEAL, 3);
    text(
        &mut commands,
        60,
        y_pos + 40,
        "💡 ④ ネコの目になって気づいたこと".to_string(),
        TEAL,
        SCALE_HEADER,
    );
    let mut q4y = y_pos + 70;
    text(
        &mut commands,
        80,
        q4y,
        format!(
            "おどろいたこと: {}",
            answer_or_placeholder(answers, AnswerKey::Surprised)
        ),
        Color::BLACK,
        SCALE_BODY,
    );
    q4y += 50;
    text(
        &mut commands,
        80,
        q4y,
        format!(
            "すきだなと思った場所: {}",
            answer_or_placeholder(answers, AnswerKey::LikedPlace)
        ),
        Color::BLACK,
        SCALE_BODY,
    );
    q4y += 50;
    text(
        &mut commands,
        80,
        q4y,
        format!(
            "もしほんとうにネコだったら何をしてみたい? {}",
            answer_or_placeholder(answers, AnswerKey::Wish)
        ),
        Color::BLACK,
        SCALE_BODY,
    );
    y_pos += 260;

    // Final height is fixed by the last write position
    WorksheetPlan {
        width,
        height: y_pos as u32,
        commands,
    }
}
