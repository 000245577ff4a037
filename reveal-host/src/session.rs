//! # Session 模块
//!
//! 把页面、调度器、滚动观察器、补间引擎和时钟组装在一起，
//! 按脚本回放滚动过程并记录派发时间线。
//!
//! ## 执行流程
//!
//! ```text
//! scroll_to / resize / advance
//!     ↓
//! ScrollObserver::sync → 越过阈值的目标
//!     ↓
//! RevealScheduler::on_threshold_crossed → TweenRequest
//!     ↓
//! AnimationSystem（插值）+ 时间线记录
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use reveal_runtime::{
    Clock, DispatchOutcome, ResolveDiagnostic, RevealScheduler, TargetId, TweenEngine,
    TweenRequest, TweenState,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::animation::{AnimatedElement, AnimationEvent, AnimationSystem};
use crate::clock::ManualClock;
use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::marquee::Marquee;
use crate::observer::ScrollObserver;
use crate::page::{PageDocument, ScrollAction, ScrollScript};

/// 派发类型
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKind {
    /// 入场动画
    Animate(TweenRequest),
    /// 初始化时已在视口上方，直接显示
    RevealedAtInit,
    /// 静态预览模式，直接显示
    StaticPreview,
}

/// 时间线中的一条记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRecord {
    /// 派发时间（秒）
    pub time: f64,
    pub target: TargetId,
    /// 元素显示名称
    pub name: String,
    pub kind: DispatchKind,
}

impl DispatchRecord {
    /// 动画请求（直接显示的记录返回 `None`）
    pub fn request(&self) -> Option<&TweenRequest> {
        match &self.kind {
            DispatchKind::Animate(request) => Some(request),
            _ => None,
        }
    }
}

impl std::fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>8.3}s  {:<20}", self.time, self.name)?;
        match &self.kind {
            DispatchKind::Animate(request) => write!(
                f,
                "  from ({:>6.1}, {:>6.1})  duration {:.3}s  delay {:.3}s",
                request.from.x, request.from.y, request.duration, request.delay
            ),
            DispatchKind::RevealedAtInit => write!(f, "  revealed at init"),
            DispatchKind::StaticPreview => write!(f, "  static preview"),
        }
    }
}

/// 平滑滚动
#[derive(Debug, Clone, Copy)]
struct ScrollMotion {
    start: f64,
    from: f32,
    to: f32,
    over: f32,
}

impl ScrollMotion {
    fn position(&self, now: f64) -> f32 {
        let t = ((now - self.start) / self.over as f64).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * t
    }

    fn is_finished(&self, now: f64) -> bool {
        now - self.start >= self.over as f64
    }
}

/// 回放会话
pub struct RevealSession {
    config: AppConfig,
    page: PageDocument,
    /// 静态预览模式下为 `None`
    scheduler: Option<RevealScheduler>,
    observer: ScrollObserver,
    engine: AnimationSystem,
    elements: BTreeMap<TargetId, Rc<AnimatedElement>>,
    clock: ManualClock,
    debouncer: Debouncer,
    marquee: Option<Marquee>,
    scroll_y: f32,
    viewport_width: f32,
    timeline: Vec<DispatchRecord>,
    /// 已开始播放的补间轨道数
    started_tracks: usize,
    /// 已播放完毕的补间轨道数
    completed_tracks: usize,
}

impl std::fmt::Debug for RevealSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealSession")
            .field("elements", &self.elements.len())
            .field("now", &self.clock.now())
            .field("scroll_y", &self.scroll_y)
            .field("timeline", &self.timeline.len())
            .finish()
    }
}

impl RevealSession {
    /// 创建会话并完成初始化
    ///
    /// 初始化后立即同步一次滚动位置，已经越过触发线的元素会在 t=0 派发。
    pub fn new(page: PageDocument, config: AppConfig) -> Self {
        let reveal_config = config.reveal_config();
        let viewport = page.viewport;

        let mut engine = AnimationSystem::new();
        let mut elements = BTreeMap::new();
        for (id, _) in page.reveal_targets() {
            let element = Rc::new(AnimatedElement::hidden());
            engine.register(id, element.clone());
            elements.insert(id, element);
        }

        let mut observer =
            ScrollObserver::new(page.reveal_targets().map(|(id, element)| (id, element.top)));
        let mut timeline = Vec::new();

        let scheduler = if config.reveal.static_preview {
            for &id in elements.keys() {
                engine.set(id, TweenState::revealed());
                timeline.push(DispatchRecord {
                    time: 0.0,
                    target: id,
                    name: page.display_name(id),
                    kind: DispatchKind::StaticPreview,
                });
            }
            info!(count = elements.len(), "静态预览模式，所有元素直接显示");
            None
        } else {
            let scheduler = RevealScheduler::initialize(
                reveal_config,
                page.snapshots(viewport.scroll_y),
                viewport.width,
                &mut observer,
                &mut engine,
            );
            for diagnostic in scheduler.diagnostics() {
                debug!(target_id = %diagnostic.target, "{}", diagnostic);
            }
            for &id in scheduler.revealed_at_init() {
                timeline.push(DispatchRecord {
                    time: 0.0,
                    target: id,
                    name: page.display_name(id),
                    kind: DispatchKind::RevealedAtInit,
                });
            }
            info!(
                targets = scheduler.targets().len(),
                revealed_at_init = scheduler.revealed_at_init().len(),
                transition_distance = scheduler.transition_distance(),
                "调度器已初始化"
            );
            Some(scheduler)
        };

        let marquee = page
            .marquee
            .as_ref()
            .and_then(|m| Marquee::from_element(m, config.marquee.default_duration_per_item));

        let mut session = Self {
            debouncer: Debouncer::from_millis(config.marquee.resize_debounce_ms),
            config,
            scheduler,
            observer,
            engine,
            elements,
            clock: ManualClock::default(),
            marquee,
            scroll_y: viewport.scroll_y,
            viewport_width: viewport.width,
            timeline,
            started_tracks: 0,
            completed_tracks: 0,
            page,
        };
        session.sync_observer();
        session
    }

    // ========== 宿主事件 ==========

    /// 立即滚动到指定位置
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y;
        self.sync_observer();
    }

    /// 视口宽度变化
    ///
    /// 调度器立即更新过渡距离；跑马灯经过去抖后重新播放。
    pub fn resize(&mut self, width: f32) {
        self.viewport_width = width;
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.on_resize(width);
            debug!(
                width,
                transition_distance = scheduler.transition_distance(),
                "视口尺寸变化"
            );
        }
        if self.marquee.is_some() {
            self.debouncer.notify(self.clock.now());
        }
    }

    /// 推进时间
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.clock.advance(dt as f64);
        self.tick(dt);
    }

    /// 直接跳到指定时间
    ///
    /// 只在没有滚动、动画与去抖等待时使用，中间不逐帧推进。
    fn skip_to(&mut self, at: f64) {
        let dt = at - self.clock.now();
        if dt <= 0.0 {
            return;
        }
        self.clock.set(at);
        debug!(from = at - dt, to = at, "空闲，时钟直接跳转");
        self.tick(dt as f32);
    }

    /// 时钟推进后更新补间、跑马灯与去抖
    fn tick(&mut self, dt: f32) {
        for event in self.engine.update(dt) {
            match event {
                AnimationEvent::Started(_) => self.started_tracks += 1,
                AnimationEvent::Completed(_) => self.completed_tracks += 1,
            }
        }
        if let Some(marquee) = self.marquee.as_mut() {
            marquee.advance(dt);
            if self.debouncer.poll(self.clock.now()) {
                marquee.replay();
            }
        }
    }

    /// 是否没有任何需要逐帧推进的工作
    fn is_idle(&self) -> bool {
        !self.engine.has_active_animations() && !self.debouncer.is_pending()
    }

    /// 按脚本回放
    ///
    /// 以配置的帧间隔推进时间，到点执行步骤；脚本结束后调用 [`Self::settle`]。
    /// 没有平滑滚动、动画或去抖等待时，时钟直接跳到下一步骤的时间，
    /// 因此很远的步骤不会逐帧空转。
    pub fn run_script(&mut self, script: &ScrollScript) {
        let frame = self.frame_interval();
        let steps = script.ordered_steps();
        let mut next = 0;
        let mut motion: Option<ScrollMotion> = None;
        info!(
            steps = steps.len(),
            end_time = script.end_time(),
            "开始回放滚动脚本"
        );

        loop {
            let now = self.clock.now();

            while let Some(step) = steps.get(next).filter(|s| s.at <= now) {
                match step.action {
                    ScrollAction::ScrollTo { y, over } if over > 0.0 => {
                        motion = Some(ScrollMotion {
                            start: now,
                            from: self.scroll_y,
                            to: y,
                            over,
                        });
                    }
                    ScrollAction::ScrollTo { y, .. } => {
                        motion = None;
                        self.scroll_to(y);
                    }
                    ScrollAction::Resize { width } => self.resize(width),
                    ScrollAction::Wait => {}
                }
                next += 1;
            }

            if let Some(m) = motion {
                self.scroll_to(m.position(now));
                if m.is_finished(now) {
                    motion = None;
                }
            }

            if next >= steps.len() && motion.is_none() {
                break;
            }
            match steps.get(next) {
                Some(step) if motion.is_none() && self.is_idle() => self.skip_to(step.at),
                _ => self.advance(frame),
            }
        }

        self.settle();
    }

    /// 继续推进时间，直到所有动画播放完毕（最多 `settle_limit` 秒）
    pub fn settle(&mut self) {
        let frame = self.frame_interval();
        let limit = self.config.simulation.settle_limit.max(0.0);
        let mut elapsed = 0.0;
        while (self.engine.has_active_animations() || self.debouncer.is_pending())
            && elapsed < limit
        {
            self.advance(frame);
            elapsed += frame;
        }
    }

    fn frame_interval(&self) -> f32 {
        let frame = self.config.simulation.frame_interval;
        if frame.is_finite() && frame > 0.0 {
            frame
        } else {
            1.0 / 60.0
        }
    }

    /// 同步观察器，把越过阈值的目标交给调度器
    fn sync_observer(&mut self) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        let crossed = self
            .observer
            .sync(self.scroll_y, self.page.viewport.height);

        for id in crossed {
            if let DispatchOutcome::Dispatched(request) =
                scheduler.on_threshold_crossed(id, &self.clock, &mut self.engine)
            {
                let name = self.page.display_name(id);
                debug!(
                    target_id = %id,
                    name = %name,
                    delay = request.delay,
                    group_index = scheduler.grouping().group_index(),
                    "派发入场动画"
                );
                self.timeline.push(DispatchRecord {
                    time: self.clock.now(),
                    target: id,
                    name,
                    kind: DispatchKind::Animate(request),
                });
            }
        }
    }

    // ========== 查询方法 ==========

    /// 派发时间线
    pub fn timeline(&self) -> &[DispatchRecord] {
        &self.timeline
    }

    /// 动画请求（按派发顺序）
    pub fn requests(&self) -> Vec<TweenRequest> {
        self.timeline.iter().filter_map(|r| r.request().copied()).collect()
    }

    /// 元素当前状态
    pub fn element_state(&self, id: TargetId) -> Option<TweenState> {
        self.elements.get(&id).map(|element| element.state())
    }

    /// 调度器（静态预览模式下为 `None`）
    pub fn scheduler(&self) -> Option<&RevealScheduler> {
        self.scheduler.as_ref()
    }

    /// 属性回退诊断
    pub fn diagnostics(&self) -> &[ResolveDiagnostic] {
        self.scheduler
            .as_ref()
            .map_or(&[][..], |scheduler| scheduler.diagnostics())
    }

    /// 补间引擎
    pub fn engine(&self) -> &AnimationSystem {
        &self.engine
    }

    /// 跑马灯
    pub fn marquee(&self) -> Option<&Marquee> {
        self.marquee.as_ref()
    }

    /// 页面
    pub fn page(&self) -> &PageDocument {
        &self.page
    }

    /// 当前时间
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// 当前滚动位置
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// 当前视口宽度
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// 已开始播放的补间轨道数（每个元素 x / y / opacity 三条）
    pub fn started_tracks(&self) -> usize {
        self.started_tracks
    }

    /// 已播放完毕的补间轨道数
    pub fn completed_tracks(&self) -> usize {
        self.completed_tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "viewport": { "width": 1280, "height": 1000 },
        "elements": [
            { "name": "a", "top": 100, "height": 100, "attributes": { "data-anim": "fadeslide-up" } },
            { "name": "b", "top": 200, "height": 100, "attributes": { "data-anim": "fadeslide-in-left" } },
            { "name": "c", "top": 2000, "height": 100, "attributes": { "data-anim": "fade" } }
        ]
    }"#;

    fn session(config: AppConfig) -> RevealSession {
        RevealSession::new(PageDocument::from_json(PAGE).unwrap(), config)
    }

    #[test]
    fn test_initial_sync_groups_visible_elements() {
        let session = session(AppConfig::default());
        let requests = session.requests();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].delay, 0.0);
        assert!((requests[1].delay - 0.1).abs() < 1e-6);
        assert_eq!(requests[0].from, TweenState::hidden(0.0, 75.0));
        assert_eq!(requests[1].from, TweenState::hidden(-75.0, 0.0));
    }

    #[test]
    fn test_scroll_fires_remaining_element() {
        let mut session = session(AppConfig::default());
        session.advance(1.0);
        session.scroll_to(1500.0);

        let timeline = session.timeline();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[2].name, "c");
        assert_eq!(timeline[2].time, 1.0);
        // 与上一组间隔超过窗口，重新开始分组
        assert_eq!(timeline[2].request().unwrap().delay, 0.0);
    }

    #[test]
    fn test_animations_settle_to_final_state() {
        let mut session = session(AppConfig::default());
        session.settle();

        assert_eq!(session.element_state(TargetId(0)), Some(TweenState::revealed()));
        assert_eq!(session.element_state(TargetId(1)), Some(TweenState::revealed()));
        // 尚未滚动到的元素保持隐藏
        assert_eq!(session.element_state(TargetId(2)).unwrap().opacity, 0.0);
    }

    #[test]
    fn test_static_preview_reveals_everything() {
        let mut config = AppConfig::default();
        config.reveal.static_preview = true;
        let session = session(config);

        assert!(session.scheduler().is_none());
        assert!(session.requests().is_empty());
        assert_eq!(session.timeline().len(), 3);
        assert!(
            session
                .timeline()
                .iter()
                .all(|r| r.kind == DispatchKind::StaticPreview)
        );
        assert_eq!(session.element_state(TargetId(2)), Some(TweenState::revealed()));
    }

    #[test]
    fn test_script_scroll_motion() {
        let mut session = session(AppConfig::default());
        let script = ScrollScript::from_json(
            r#"{ "steps": [ { "at": 0.5, "action": { "scroll_to": { "y": 1500, "over": 0.5 } } } ] }"#,
        )
        .unwrap();
        session.run_script(&script);

        assert_eq!(session.scroll_y(), 1500.0);
        let last = session.timeline().last().unwrap();
        assert_eq!(last.name, "c");
        // 触发线 900：滚动超过 1100 时才触发，晚于开始滚动的时刻
        assert!(last.time > 0.5 && last.time < 1.05);
    }

    #[test]
    fn test_display_record() {
        let session = session(AppConfig::default());
        let line = session.timeline()[0].to_string();
        assert!(line.contains("a"));
        assert!(line.contains("delay 0.000s"));
    }
}
