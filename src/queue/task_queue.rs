// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::Task;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use thiserror::Error;
use tokio::sync::Notify;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 队列已关闭，不再接受或派发任务
    #[error("Queue closed")]
    Closed,
}

/// 任务队列特质
///
/// 排序契约：出队总是返回当前队列中优先级数值最小的任务，
/// 同优先级按入队时间先到先出。队列自身不做去重。
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// 入队任务
    ///
    /// 除队列不可用外总是成功；该失败是致命的，调用方必须处理
    async fn enqueue(&self, task: Task) -> Result<(), QueueError>;

    /// 出队任务，队列为空时阻塞等待
    async fn dequeue(&self) -> Result<Task, QueueError>;

    /// 出队任务，队列为空时立即返回`None`
    async fn try_dequeue(&self) -> Result<Option<Task>, QueueError>;

    /// 检查队列中是否存在指定网站的任务
    async fn has_task_for(&self, website_id: i64) -> Result<bool, QueueError>;

    /// 当前排队任务数量
    fn len(&self) -> usize;

    /// 队列是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<T: TaskQueue + ?Sized> TaskQueue for std::sync::Arc<T> {
    async fn enqueue(&self, task: Task) -> Result<(), QueueError> {
        (**self).enqueue(task).await
    }

    async fn dequeue(&self) -> Result<Task, QueueError> {
        (**self).dequeue().await
    }

    async fn try_dequeue(&self) -> Result<Option<Task>, QueueError> {
        (**self).try_dequeue().await
    }

    async fn has_task_for(&self, website_id: i64) -> Result<bool, QueueError> {
        (**self).has_task_for(website_id).await
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// 堆内元素
///
/// 入队序号在时间戳相同时保证严格的先进先出
struct QueuedTask {
    task: Task,
    seq: u64,
}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for QueuedTask {}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedTask {
    // BinaryHeap弹出最大元素，因此反转比较方向：
    // 优先级数值更小、入队更早的任务为“更大”
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .task
            .priority
            .cmp(&self.task.priority)
            .then_with(|| other.task.enqueued_at.cmp(&self.task.enqueued_at))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct QueueState {
    heap: BinaryHeap<QueuedTask>,
    seq: u64,
    closed: bool,
}

/// 内存优先级任务队列
///
/// 互斥锁保护的二叉堆加唤醒通知。任意数量的并发生产者与
/// 消费者可以安全使用；排序在锁内维护，与生产者的调度
/// 顺序无关。
pub struct MemoryTaskQueue {
    state: Mutex<QueueState>,
    notify: Notify,
}

impl Default for MemoryTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTaskQueue {
    /// 创建新的空队列
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                heap: BinaryHeap::new(),
                seq: 0,
                closed: false,
            }),
            notify: Notify::new(),
        }
    }

    /// 关闭队列
    ///
    /// 关闭后`enqueue`返回`QueueError::Closed`，
    /// 队列排空后阻塞中的消费者同样收到`Closed`
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.notify.notify_waiters();
    }

    fn pop(&self) -> Result<Option<Task>, QueueError> {
        let mut state = self.state.lock();
        match state.heap.pop() {
            Some(entry) => {
                // Wake another consumer if work remains; a single stored
                // permit does not cover multiple pending enqueues.
                if !state.heap.is_empty() {
                    self.notify.notify_one();
                }
                Ok(Some(entry.task))
            }
            None if state.closed => Err(QueueError::Closed),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TaskQueue for MemoryTaskQueue {
    async fn enqueue(&self, task: Task) -> Result<(), QueueError> {
        {
            let mut state = self.state.lock();
            if state.closed {
                return Err(QueueError::Closed);
            }
            let seq = state.seq;
            state.seq += 1;
            state.heap.push(QueuedTask { task, seq });
        }
        self.notify.notify_one();
        Ok(())
    }

    async fn dequeue(&self) -> Result<Task, QueueError> {
        loop {
            let notified = self.notify.notified();
            match self.pop()? {
                Some(task) => return Ok(task),
                None => notified.await,
            }
        }
    }

    async fn try_dequeue(&self) -> Result<Option<Task>, QueueError> {
        self.pop()
    }

    async fn has_task_for(&self, website_id: i64) -> Result<bool, QueueError> {
        let state = self.state.lock();
        Ok(state
            .heap
            .iter()
            .any(|entry| entry.task.website_id == website_id))
    }

    fn len(&self) -> usize {
        self.state.lock().heap.len()
    }
}
