// ABOUTME: Fixed slide and placeholder-image tables for the generated deck
// ABOUTME: Both tables are compiled in and kept in slide order

use image::Rgb;

/// One slide: title, bullet lines and the placeholder image it embeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSpec {
    pub title: &'static str,
    pub bullets: &'static [&'static str],
    pub image: &'static str,
}

/// One placeholder image to render before the deck is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub file_name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub background: Rgb<u8>,
}

/// Navy fill shared by every generated card
pub const CARD_BACKGROUND: Rgb<u8> = Rgb([28, 45, 86]);

pub const IMAGES: [ImageSpec; 14] = [
    ImageSpec {
        file_name: "01_title.png",
        title: "Обзор компьютерных игр",
        subtitle: "Индивидуальный проект",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "02_relevance.png",
        title: "Актуальность",
        subtitle: "Игровая индустрия как часть цифровой экономики",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "03_goal.png",
        title: "Цель и задачи",
        subtitle: "Структура исследовательской работы",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "04_object.png",
        title: "Объект и предмет",
        subtitle: "Методы исследования",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "05_history.png",
        title: "История игр",
        subtitle: "От аркад до современных AAA",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "06_genres.png",
        title: "Жанры",
        subtitle: "Экшен, RPG, стратегии, симуляторы",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "07_platforms.png",
        title: "Платформы",
        subtitle: "ПК, консоли, мобильные устройства",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "08_society.png",
        title: "Влияние на общество",
        subtitle: "Плюсы и возможные риски",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "09_games.png",
        title: "Практический обзор",
        subtitle: "Counter-Strike 2, Dota 2, Minecraft",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "10_compare.png",
        title: "Сравнительный анализ",
        subtitle: "Графика, сюжет, геймплей",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "11_choice.png",
        title: "Выбор лучшего продукта",
        subtitle: "Обоснование выбора Minecraft",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "12_feedback.png",
        title: "Отзывы пользователей",
        subtitle: "Оценки, рейтинги, ожидания",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "13_conclusion.png",
        title: "Выводы",
        subtitle: "Итоги исследования",
        background: CARD_BACKGROUND,
    },
    ImageSpec {
        file_name: "14_thanks.png",
        title: "Спасибо за внимание",
        subtitle: "Вопросы?",
        background: CARD_BACKGROUND,
    },
];

pub const SLIDES: [SlideSpec; 14] = [
    SlideSpec {
        title: "Тема проекта",
        bullets: &[
            "Обзор компьютерных игр",
            "Жамалов Салман Имаммединович",
            "Нижневартовск, 2026",
        ],
        image: "01_title.png",
    },
    SlideSpec {
        title: "Актуальность темы",
        bullets: &[
            "Игры — значимая часть цифровой индустрии",
            "Влияние на образование, культуру, экономику",
            "Рост киберспорта и онлайн-сервисов",
        ],
        image: "02_relevance.png",
    },
    SlideSpec {
        title: "Цель и задачи",
        bullets: &[
            "Цель: провести обзор компьютерных игр",
            "Задачи: история, жанры, платформы",
            "Сравнение и выводы по качеству",
        ],
        image: "03_goal.png",
    },
    SlideSpec {
        title: "Объект, предмет, методы",
        bullets: &[
            "Объект: компьютерные игры",
            "Предмет: жанровые и технологические особенности",
            "Методы: анализ, сравнение, обзор оценок",
        ],
        image: "04_object.png",
    },
    SlideSpec {
        title: "1.1 Эволюция игр",
        bullets: &[
            "Аркадные автоматы и первые консоли",
            "Переход к 3D и сетевым режимам",
            "Современная модель: «игра как сервис»",
        ],
        image: "05_history.png",
    },
    SlideSpec {
        title: "1.2 Жанры игр",
        bullets: &[
            "Экшен — динамика и реакция",
            "RPG — развитие персонажа и сюжет",
            "Стратегии/симуляторы — планирование",
        ],
        image: "06_genres.png",
    },
    SlideSpec {
        title: "1.3 Платформы и технологии",
        bullets: &[
            "ПК: гибкость и модификации",
            "Консоли: стабильность и оптимизация",
            "Unity и Unreal Engine",
        ],
        image: "07_platforms.png",
    },
    SlideSpec {
        title: "1.4 Влияние игр на общество",
        bullets: &[
            "Плюсы: развитие навыков и коммуникации",
            "Риски: зависимость, монетизация, токсичность",
            "Нужна цифровая грамотность",
        ],
        image: "08_society.png",
    },
    SlideSpec {
        title: "2.1 Выбранные игры",
        bullets: &["Counter-Strike 2", "Dota 2", "Minecraft, Cyberpunk 2077, Forza Horizon 5"],
        image: "09_games.png",
    },
    SlideSpec {
        title: "2.2 Сравнительный анализ",
        bullets: &[
            "Критерии: графика, геймплей, сюжет",
            "Оценка технической стабильности",
            "Уровень входа для новичков",
        ],
        image: "10_compare.png",
    },
    SlideSpec {
        title: "2.3 Обоснование выбора",
        bullets: &[
            "Наиболее сбалансированный продукт: Minecraft",
            "Доступность и образовательный потенциал",
            "Сильное сообщество и обновления",
        ],
        image: "11_choice.png",
    },
    SlideSpec {
        title: "2.4 Пользовательский опыт",
        bullets: &[
            "Отзывы зависят от ожиданий аудитории",
            "Важны: баланс, честный матчмейкинг",
            "Прозрачные обновления и поддержка",
        ],
        image: "12_feedback.png",
    },
    SlideSpec {
        title: "Заключение",
        bullets: &[
            "Цель проекта достигнута",
            "Проведен теоретический и практический обзор",
            "Определены перспективы развития индустрии",
        ],
        image: "13_conclusion.png",
    },
    SlideSpec {
        title: "Спасибо за внимание",
        bullets: &[
            "Готов ответить на вопросы",
            "Информационная база: 15 источников",
            "Презентация по материалам DOCX",
        ],
        image: "14_thanks.png",
    },
];

/// The image rendered for `slide`, if the table has one
pub fn image_for(slide: &SlideSpec) -> Option<&'static ImageSpec> {
    IMAGES.iter().find(|image| image.file_name == slide.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_slide_has_an_image() {
        for slide in &SLIDES {
            assert!(image_for(slide).is_some(), "no image for {}", slide.title);
        }
    }

    #[test]
    fn test_image_names_are_unique_and_ordered() {
        let names: HashSet<_> = IMAGES.iter().map(|i| i.file_name).collect();
        assert_eq!(names.len(), IMAGES.len());
        assert_eq!(IMAGES[0].file_name, "01_title.png");
        assert_eq!(IMAGES[13].file_name, "14_thanks.png");
        for (slide, image) in SLIDES.iter().zip(IMAGES.iter()) {
            assert_eq!(slide.image, image.file_name);
        }
    }

    #[test]
    fn test_every_slide_has_bullets() {
        assert!(SLIDES.iter().all(|s| !s.bullets.is_empty()));
    }
}
